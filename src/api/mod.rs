pub mod caisse;
