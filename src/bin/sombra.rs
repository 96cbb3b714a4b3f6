// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/sombracore

//! Command-line shell around the split/recombine pipelines.
//!
//! Split a secret into shadows, or recombine shadows into the secret:
//!
//! ```text
//! sombra -d -secret lena.bmp -k 3 -n 5 [-dir carriers/]
//! sombra -r -secret recovered.bmp -k 3 [-n 5] [-dir carriers/]
//! ```
//!
//! The directory scan lives here, not in the library: carriers are every
//! `.bmp` in the directory (shadows excluded), shadows are the `sombra*.bmp`
//! files, both sorted by name so the ordering is deterministic.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use sombra_core::{recombine_secret, split_secret};

struct Args {
    mode: char, // 'd' = distribute (split), 'r' = recombine
    secret: String,
    k: usize,
    n: Option<usize>,
    dir: String,
}

fn main() {
    let args = parse_args();

    let result = match args.mode {
        'd' => run_split(&args),
        'r' => run_recombine(&args),
        _ => unreachable!(),
    };

    if let Err(msg) = result {
        eprintln!("{msg}");
        process::exit(1);
    }
}

fn run_split(args: &Args) -> Result<(), String> {
    let n = args.n.ok_or("split mode requires -n")?;
    let secret = fs::read(&args.secret)
        .map_err(|e| format!("cannot read secret {}: {e}", args.secret))?;

    // Stale shadows in the output directory would otherwise be picked up as
    // carriers on the next run.
    for old in list_bmps(&args.dir, true)? {
        fs::remove_file(&old).map_err(|e| format!("cannot remove {}: {e}", old.display()))?;
    }

    let carrier_paths = list_bmps(&args.dir, false)?;
    if carrier_paths.len() < n {
        return Err(format!(
            "not enough carrier images in {}: need {n}, found {}",
            args.dir,
            carrier_paths.len()
        ));
    }

    let mut carriers = Vec::with_capacity(n);
    for path in &carrier_paths[..n] {
        carriers.push(fs::read(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?);
    }

    let shadows = split_secret(&secret, &carriers, args.k, n, None).map_err(|e| e.to_string())?;

    for (i, shadow) in shadows.iter().enumerate() {
        let path = Path::new(&args.dir).join(format!("sombra{}.bmp", i + 1));
        fs::write(&path, shadow).map_err(|e| format!("cannot write {}: {e}", path.display()))?;
        println!("wrote {}", path.display());
    }
    Ok(())
}

fn run_recombine(args: &Args) -> Result<(), String> {
    let shadow_paths = list_bmps(&args.dir, true)?;
    if let Some(n) = args.n {
        if shadow_paths.len() < n {
            return Err(format!(
                "not enough shadows in {}: need at least {n}, found {}",
                args.dir,
                shadow_paths.len()
            ));
        }
    }

    let mut shadows = Vec::new();
    for path in &shadow_paths {
        shadows.push(fs::read(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?);
    }

    let secret = recombine_secret(&shadows, args.k).map_err(|e| e.to_string())?;
    fs::write(&args.secret, &secret)
        .map_err(|e| format!("cannot write {}: {e}", args.secret))?;
    println!("secret recovered to {}", args.secret);
    Ok(())
}

/// List `.bmp` files in `dir`, sorted by name. With `shadows_only`, keep only
/// `sombra*.bmp`; otherwise exclude them (they are outputs, not carriers).
fn list_bmps(dir: &str, shadows_only: bool) -> Result<Vec<PathBuf>, String> {
    let entries = fs::read_dir(dir).map_err(|e| format!("cannot read directory {dir}: {e}"))?;
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            let name = p
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("")
                .to_ascii_lowercase();
            name.ends_with(".bmp") && name.starts_with("sombra") == shadows_only
        })
        .collect();
    paths.sort();
    Ok(paths)
}

fn parse_args() -> Args {
    let argv: Vec<String> = std::env::args().collect();
    let mut mode = None;
    let mut secret = None;
    let mut k = None;
    let mut n = None;
    let mut dir = String::from(".");

    let mut i = 1;
    while i < argv.len() {
        match argv[i].as_str() {
            "-d" => mode = Some('d'),
            "-r" => mode = Some('r'),
            "-secret" => secret = Some(take_value(&argv, &mut i, "-secret")),
            "-k" => k = Some(take_number(&argv, &mut i, "-k")),
            "-n" => n = Some(take_number(&argv, &mut i, "-n")),
            "-dir" => dir = take_value(&argv, &mut i, "-dir"),
            other => usage_exit(&format!("unrecognized argument: {other}")),
        }
        i += 1;
    }

    let mode = mode.unwrap_or_else(|| usage_exit("missing mode: -d or -r"));
    let secret = secret.unwrap_or_else(|| usage_exit("missing -secret"));
    let k = k.unwrap_or_else(|| usage_exit("missing -k"));
    if !secret.to_ascii_lowercase().ends_with(".bmp") {
        usage_exit("the secret file must have a .bmp extension");
    }

    Args { mode, secret, k, n, dir }
}

fn take_value(argv: &[String], i: &mut usize, flag: &str) -> String {
    *i += 1;
    if *i >= argv.len() {
        usage_exit(&format!("missing value after {flag}"));
    }
    argv[*i].clone()
}

fn take_number(argv: &[String], i: &mut usize, flag: &str) -> usize {
    let value = take_value(argv, i, flag);
    value
        .parse()
        .unwrap_or_else(|_| usage_exit(&format!("{flag} must be an integer")))
}

fn usage_exit(message: &str) -> ! {
    eprintln!("{message}");
    eprintln!("Usage:");
    eprintln!("  split:     sombra -d -secret <file.bmp> -k <num> -n <num> [-dir <directory>]");
    eprintln!("  recombine: sombra -r -secret <file.bmp> -k <num> [-n <num>] [-dir <directory>]");
    process::exit(1);
}
