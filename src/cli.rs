// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Command, arg, value_parser};

fn output_flags(cmd: Command) -> Command {
    cmd.arg(arg!(--json "Print as pretty JSON"))
        .arg(arg!(--jsonl "Print as JSON lines"))
}

fn window_args(cmd: Command) -> Command {
    cmd.arg(
        arg!(--period <PERIOD> "week|month|year containing today (default month)").required(false),
    )
        .arg(arg!(--from <DATE> "Window start, YYYY-MM-DD").required(false))
        .arg(arg!(--to <DATE> "Window end, YYYY-MM-DD").required(false))
}

fn entry_args(cmd: Command, required: bool) -> Command {
    cmd.arg(arg!(--"type" <TYPE> "income|expense").required(required))
        .arg(arg!(--category <CATEGORY>).required(required))
        .arg(arg!(--amount <AMOUNT> "Positive amount").required(required))
        .arg(arg!(--date <DATE> "YYYY-MM-DD").required(required))
        .arg(arg!(--note <NOTE>).required(false))
}

pub fn build_cli() -> Command {
    Command::new("spendwise")
        .about("Track income and expenses, budgets, trends, and insights")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand(
            Command::new("init")
                .about("Create the database")
                .arg(arg!(--"seed-budgets" "Seed default category budgets")),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and manage transactions")
                .subcommand(entry_args(Command::new("add").about("Record a transaction"), true))
                .subcommand(output_flags(
                    Command::new("list")
                        .about("List transactions, newest first")
                        .arg(arg!(--month <MONTH> "YYYY-MM").required(false))
                        .arg(arg!(--category <CATEGORY>).required(false))
                        .arg(
                            arg!(--limit <N>)
                                .required(false)
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(entry_args(
                    Command::new("edit")
                        .about("Replace fields of a transaction")
                        .arg(arg!(--id <ID>).required(true)),
                    false,
                ))
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction")
                        .arg(arg!(--id <ID>).required(true)),
                ),
        )
        .subcommand(
            Command::new("budget")
                .about("Category budget thresholds")
                .subcommand(
                    Command::new("set")
                        .arg(arg!(--category <CATEGORY>).required(true))
                        .arg(arg!(--amount <AMOUNT>).required(true)),
                )
                .subcommand(Command::new("rm").arg(arg!(--category <CATEGORY>).required(true)))
                .subcommand(output_flags(Command::new("list")))
                .subcommand(output_flags(
                    Command::new("status")
                        .about("Spend vs budget per category")
                        .arg(arg!(--month <MONTH> "YYYY-MM, default current").required(false)),
                ))
                .subcommand(
                    Command::new("spent")
                        .about("Expense total for one category")
                        .arg(arg!(--category <CATEGORY>).required(true))
                        .arg(arg!(--month <MONTH> "YYYY-MM, default current").required(false)),
                )
                .subcommand(output_flags(
                    Command::new("alerts")
                        .about("Categories at warning or over budget")
                        .arg(arg!(--month <MONTH> "YYYY-MM, default current").required(false)),
                )),
        )
        .subcommand(
            Command::new("report")
                .about("Analytics over a window")
                .subcommand(output_flags(window_args(Command::new("kpis"))))
                .subcommand(output_flags(window_args(Command::new("breakdown"))))
                .subcommand(output_flags(
                    Command::new("trend")
                        .arg(arg!(--granularity <G> "week|month").required(false))
                        .arg(
                            arg!(--buckets <N>)
                                .required(false)
                                .value_parser(value_parser!(usize)),
                        )
                        .arg(
                            arg!(--anchor <DATE> "Last bucket contains this date")
                                .required(false),
                        ),
                ))
                .subcommand(output_flags(window_args(Command::new("insights")))),
        )
        .subcommand(output_flags(
            Command::new("search")
                .about("Filter transactions")
                .arg(arg!(--text <TEXT> "Matches note or category").required(false))
                .arg(arg!(--"type" <TYPE> "income|expense").required(false))
                .arg(arg!(--category <CATEGORY>).required(false))
                .arg(arg!(--min <AMOUNT>).required(false))
                .arg(arg!(--max <AMOUNT>).required(false))
                .arg(arg!(--from <DATE>).required(false))
                .arg(arg!(--to <DATE>).required(false)),
        ))
        .subcommand(
            Command::new("export").subcommand(
                Command::new("transactions")
                    .arg(arg!(--format <FORMAT> "csv|json").required(true))
                    .arg(arg!(--out <PATH>).required(true)),
            ),
        )
        .subcommand(
            Command::new("import").subcommand(
                Command::new("transactions")
                    .arg(arg!(--path <PATH> ".json or .csv").required(true)),
            ),
        )
        .subcommand(
            Command::new("settings")
                .subcommand(Command::new("currency").arg(arg!(--set <CCY>).required(false)))
                .subcommand(
                    Command::new("clear")
                        .about("Delete all transactions, budgets and settings")
                        .arg(arg!(--yes "Confirm the deletion")),
                ),
        )
        .subcommand(Command::new("doctor").about("Report stored rows that fail validation"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_is_well_formed() {
        build_cli().debug_assert();
    }
}
