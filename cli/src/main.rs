/*
 * Copyright © 2026 The Triplestore Contributors
 *
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this file,
 * you can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Interactive `LOAD` / `SELECT` / `COUNT` / `QUIT` shell.
//!
//! Grounded on `main()` in the C++ original (`original_source/src/f_cli.cpp`):
//! a loop reading a command keyword and the rest of the line, accommodating
//! multi-line `SELECT`/`COUNT` bodies as long as the opening brace appears
//! on the first line, dispatching to the store and printing its summary.
//! CLI argument handling follows the teacher crate's `clap::Parser` style.

use std::io::{self, BufRead, Write};

use clap::Parser;
use triplestore::Store;

#[derive(Parser)]
#[command(
    name = "triplestore",
    version,
    about = "Interactive shell for an in-memory RDF triple store"
)]
struct Args {
    /// N-Triples file to load before entering the interactive shell.
    #[arg(short, long, value_name = "FILE")]
    file: Option<String>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut store = Store::new();
    if let Some(path) = &args.file {
        match std::fs::read_to_string(path) {
            Ok(text) => match store.load(&text) {
                Ok(result) => println!("{} triples loaded in {:?}.", result.count, result.elapsed),
                Err(e) => eprintln!("Error: {e}"),
            },
            Err(e) => eprintln!("Error: could not read {path}: {e}"),
        }
    }

    run_shell(&mut store);
}

fn run_shell(store: &mut Store) {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        let _ = io::stdout().flush();

        let Some(Ok(line)) = lines.next() else {
            break;
        };

        let trimmed = line.trim_start();
        let (keyword, mut rest) = match trimmed.split_once(char::is_whitespace) {
            Some((k, r)) => (k, r.to_string()),
            None => (trimmed, String::new()),
        };

        if keyword.is_empty() {
            continue;
        }

        if rest.contains('{') {
            while !rest.contains('}') {
                match lines.next() {
                    Some(Ok(more)) => {
                        rest.push(' ');
                        rest.push_str(&more);
                    }
                    _ => break,
                }
            }
        }

        match keyword.to_uppercase().as_str() {
            "LOAD" => handle_load(store, rest.trim()),
            "SELECT" => handle_select(store, rest.trim()),
            "COUNT" => handle_count(store, rest.trim()),
            "QUIT" => break,
            _ => println!("Invalid command."),
        }
    }
}

fn handle_load(store: &mut Store, path: &str) {
    match std::fs::read_to_string(path) {
        Ok(text) => match store.load(&text) {
            Ok(result) => println!("{} triples loaded in {:?}.", result.count, result.elapsed),
            Err(e) => println!("Error: {e}"),
        },
        Err(_) => println!("Error: file not found. Check the path and try again."),
    }
}

fn handle_select(store: &mut Store, query: &str) {
    match store.select(query) {
        Ok(result) => {
            println!("----------");
            println!(
                "{}",
                result
                    .projection
                    .iter()
                    .map(|v| format!("{v}\t"))
                    .collect::<String>()
            );
            for row in &result.rows {
                println!("{}", row.iter().map(|v| format!("{v}\t")).collect::<String>());
            }
            println!("----------");
            println!(
                "{} results returned in {:?}.",
                result.rows.len(),
                result.elapsed
            );
        }
        Err(e) => println!("Error: {e}"),
    }
}

fn handle_count(store: &mut Store, query: &str) {
    match store.count(query) {
        Ok(result) => {
            println!("{} results returned in {:?}.", result.count, result.elapsed);
        }
        Err(e) => println!("Error: {e}"),
    }
}
