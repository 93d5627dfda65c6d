// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn json_flags() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    ]
}

/// Month view criteria shared by listing, reports and CSV export.
fn filter_args() -> [Arg; 4] {
    [
        Arg::new("month")
            .long("month")
            .help("Displayed month YYYY-MM (default: current month)"),
        Arg::new("query")
            .long("query")
            .short('q')
            .help("Case-insensitive text matched against note or category name"),
        Arg::new("category")
            .long("category")
            .help("Category id or name, or 'all'"),
        Arg::new("type")
            .long("type")
            .help("expense|income|all"),
    ]
}

fn entry_args(required_type: bool) -> [Arg; 5] {
    let mut ty = Arg::new("type").long("type").help("expense|income");
    if required_type {
        ty = ty.default_value("expense");
    }
    [
        Arg::new("amount")
            .long("amount")
            .allow_hyphen_values(true)
            .help("Positive amount"),
        ty,
        Arg::new("category")
            .long("category")
            .help("Category id or name (default: first category of the type)"),
        Arg::new("date")
            .long("date")
            .help("YYYY-MM-DD (default: today)"),
        Arg::new("note").long("note"),
    ]
}

pub fn build_cli() -> Command {
    Command::new("spendlog")
        .version(crate_version!())
        .about("Month-at-a-glance income and expense tracker")
        .subcommand(Command::new("init").about("Create the data store and seed the category catalog"))
        .subcommand(
            Command::new("tx")
                .about("Record, edit and list transactions")
                .subcommand(
                    Command::new("add")
                        .about("Record a new transaction")
                        .args(entry_args(true)),
                )
                .subcommand(
                    Command::new("edit")
                        .about("Replace a transaction; omitted fields keep their value")
                        .arg(Arg::new("id").required(true))
                        .args(entry_args(false)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction (undoable for a few seconds)")
                        .arg(Arg::new("id").required(true)),
                )
                .subcommand(Command::new("undo").about("Restore the last deleted transaction"))
                .subcommand(
                    Command::new("list")
                        .about("List the displayed month")
                        .args(filter_args())
                        .args(json_flags()),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Inspect the category catalog")
                .subcommand(Command::new("list").args(json_flags()))
                .subcommand(
                    Command::new("rename")
                        .arg(Arg::new("id").required(true))
                        .arg(Arg::new("name").required(true)),
                ),
        )
        .subcommand(
            Command::new("report")
                .about("Summary cards, category breakdown and six-month trend")
                .subcommand(
                    Command::new("summary")
                        .args(filter_args())
                        .args(json_flags()),
                )
                .subcommand(
                    Command::new("breakdown")
                        .args(filter_args())
                        .arg(
                            Arg::new("top")
                                .long("top")
                                .value_parser(clap::value_parser!(usize))
                                .help("Only show the N largest categories"),
                        )
                        .args(json_flags()),
                )
                .subcommand(
                    Command::new("trend")
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .help("Last month of the series YYYY-MM (default: current month)"),
                        )
                        .args(json_flags()),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Write a JSON backup or a CSV sheet of the displayed month")
                .subcommand(
                    Command::new("json").arg(
                        Arg::new("out")
                            .long("out")
                            .help("Output path (default: finance-backup-YYYY-MM-DD.json)"),
                    ),
                )
                .subcommand(
                    Command::new("csv")
                        .args(filter_args())
                        .arg(
                            Arg::new("out")
                                .long("out")
                                .help("Output path (default: transactions-YYYY-MM.csv)"),
                        ),
                ),
        )
        .subcommand(
            Command::new("import")
                .about("Merge a JSON backup into the ledger")
                .subcommand(
                    Command::new("json")
                        .arg(Arg::new("path").long("path").required(true))
                        .arg(
                            Arg::new("yes")
                                .long("yes")
                                .short('y')
                                .action(ArgAction::SetTrue)
                                .help("Skip the confirmation prompt"),
                        ),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Display preferences")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("currency")
                        .about("Set the currency label used in reports")
                        .arg(Arg::new("code").required(true)),
                ),
        )
}
