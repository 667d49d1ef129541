// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id").required(true).help("Record id")
}

fn month_arg() -> Arg {
    Arg::new("month").long("month").help("Month as YYYY-MM")
}

fn type_arg() -> Arg {
    Arg::new("type")
        .long("type")
        .value_parser(["income", "expense"])
        .help("income or expense")
}

fn opt(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help)
}

/// Amount options accept negative input so the validator can reject it.
fn money(name: &'static str, help: &'static str) -> Arg {
    opt(name, help).allow_negative_numbers(true)
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Income and expense entries")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .about("Record an entry")
                .arg(money("amount", "Positive amount").required(true))
                .arg(type_arg().required(true))
                .arg(opt("category", "Category (default Umum)"))
                .arg(opt("date", "Date or ISO-8601 date-time (default now)"))
                .arg(opt("note", "Free text")),
        )
        .subcommand(json_flags(
            Command::new("list")
                .about("List entries, newest first")
                .arg(month_arg())
                .arg(type_arg())
                .arg(opt("search", "Match category or note, case-insensitive"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        ))
        .subcommand(
            Command::new("edit")
                .about("Change some fields of an entry")
                .arg(id_arg())
                .arg(money("amount", "Positive amount"))
                .arg(type_arg())
                .arg(opt("category", "Category"))
                .arg(opt("date", "Date or ISO-8601 date-time"))
                .arg(opt("note", "Free text")),
        )
        .subcommand(Command::new("rm").about("Delete an entry").arg(id_arg()))
}

fn budget_cmd() -> Command {
    Command::new("budget")
        .about("Monthly category budgets")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(money("amount", "Positive amount").required(true))
                .arg(opt("category", "Category (default Umum)"))
                .arg(month_arg()),
        )
        .subcommand(json_flags(Command::new("list").arg(month_arg())))
        .subcommand(
            Command::new("edit")
                .arg(id_arg())
                .arg(money("amount", "Positive amount"))
                .arg(opt("category", "Category"))
                .arg(month_arg()),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn recurring_cmd() -> Command {
    let frequency = || {
        Arg::new("frequency")
            .long("frequency")
            .value_parser(["daily", "weekly", "monthly", "yearly"])
    };
    Command::new("recurring")
        .about("Recurring entry templates (never posted automatically)")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(money("amount", "Positive amount").required(true))
                .arg(type_arg().required(true))
                .arg(frequency().required(true))
                .arg(opt("category", "Category (default Umum)"))
                .arg(opt("note", "Free text")),
        )
        .subcommand(json_flags(Command::new("list")))
        .subcommand(
            Command::new("edit")
                .arg(id_arg())
                .arg(money("amount", "Positive amount"))
                .arg(type_arg())
                .arg(frequency())
                .arg(opt("category", "Category"))
                .arg(opt("note", "Free text")),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn goal_cmd() -> Command {
    Command::new("goal")
        .about("Savings goals")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(money("target", "Target amount").required(true))
                .arg(opt("name", "Goal name"))
                .arg(money("current", "Amount saved so far (default 0)"))
                .arg(opt("target-date", "Date to reach the target by")),
        )
        .subcommand(json_flags(Command::new("list")))
        .subcommand(
            Command::new("edit")
                .arg(id_arg())
                .arg(money("target", "Target amount"))
                .arg(opt("name", "Goal name"))
                .arg(money("current", "Amount saved so far"))
                .arg(opt("target-date", "Date to reach the target by")),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
}

fn tag_cmd() -> Command {
    Command::new("tag")
        .about("Tags")
        .subcommand_required(true)
        .subcommand(
            Command::new("add")
                .arg(opt("name", "Tag name").required(true))
                .arg(opt("color", "Display color (default #007bff)")),
        )
        .subcommand(json_flags(Command::new("list")))
        .subcommand(
            Command::new("edit")
                .arg(id_arg())
                .arg(opt("name", "Tag name"))
                .arg(opt("color", "Display color")),
        )
        .subcommand(Command::new("rm").arg(id_arg()))
}

pub fn build_cli() -> Command {
    Command::new("dompet")
        .version(clap::crate_version!())
        .about("Personal finance tracker: entries, budgets, goals, reports and spreadsheets")
        .subcommand(Command::new("init").about("Create the data store and show where it lives"))
        .subcommand(tx_cmd())
        .subcommand(budget_cmd())
        .subcommand(recurring_cmd())
        .subcommand(goal_cmd())
        .subcommand(tag_cmd())
        .subcommand(json_flags(
            Command::new("summary")
                .about("Income, expense and balance")
                .arg(month_arg()),
        ))
        .subcommand(
            Command::new("report")
                .about("Reports")
                .subcommand_required(true)
                .subcommand(json_flags(
                    Command::new("categories")
                        .about("Income, expense and count per category")
                        .arg(month_arg()),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Write entries to a CSV or XLSX file")
                .arg(
                    Arg::new("format")
                        .long("format")
                        .default_value("xlsx")
                        .help("csv or xlsx"),
                )
                .arg(month_arg())
                .arg(opt("out", "Output path (default entries[-MONTH].FORMAT)")),
        )
        .subcommand(
            Command::new("import")
                .about("Add entries from a CSV or XLSX file")
                .arg(opt("path", "File to read").required(true)),
        )
        .subcommand(json_flags(
            Command::new("dashboard").about("Record counts and the latest records"),
        ))
}
