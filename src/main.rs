//! An interactive browser over a parsed O-antigen structure database

use std::{env, fs};

use antigen::{AntigenRecord, database};
use miette::{IntoDiagnostic, Report, Result, WrapErr};
use rustyline::{DefaultEditor, error::ReadlineError};

fn main() -> Result<()> {
    let path = env::args().nth(1).unwrap_or_else(|| "database.txt".to_owned());
    let text = fs::read_to_string(&path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read the antigen database at {path}"))?;

    let mut records = Vec::new();
    let mut failures = 0;
    for result in database::parse(&text) {
        match result {
            Ok(record) => records.push(record),
            Err(error) => {
                eprintln!("{:?}", Report::new(*error));
                failures += 1;
            }
        }
    }
    println!("loaded {} antigen records from {path} ({failures} failed)", records.len());
    println!("enter a record name to see its structure, or `list` for all names");

    let mut editor = DefaultEditor::new().into_diagnostic()?;
    loop {
        match editor.readline("antigen> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                show(line.trim(), &records);
            }
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(error) => return Err(error).into_diagnostic(),
        }
    }
    Ok(())
}

fn show(query: &str, records: &[AntigenRecord]) {
    match query {
        "" => {}
        "list" => {
            for record in records {
                println!("{}", record.name());
            }
        }
        name => match records.iter().find(|record| record.name() == name) {
            Some(record) => println!("{record}"),
            None => println!("no antigen record named {name}"),
        },
    }
}
