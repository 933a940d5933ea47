pub fn execute() -> String {
    [
        "📖 Caisse Console Commands",
        "",
        "🏦 Cash Registers",
        "  $caisses              List cash registers (* = selected)",
        "  $caisse <id>          Select a cash register and show its details",
        "  $create <name>        Create a cash register",
        "",
        "💵 Funds",
        "  $deposit [id]         Open the deposit dialog",
        "  $withdraw [id]        Open the withdrawal dialog",
        "  In a dialog: amount <value>, desc <text>, show, submit, cancel",
        "",
        "📜 Operations & Reports",
        "  $ops [page] [all] [type=TYPE] [date=YYYY-MM-DD] [search=TEXT]",
        "  $next / $prev         Page through operations",
        "  $report               Totals for the loaded operations",
        "",
        "  $help                 Show this message",
        "  $quit                 Leave the console",
    ]
    .join("\n")
}
