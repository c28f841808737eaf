// mpc-pgm: load, verify, and dump Akai MPC 1000 program (.pgm) files.
//
// Thin driver around the codec: every mode loads a program buffer (a file
// or the embedded factory image), round-trips it through parse/serialize,
// and reports the result.

use std::env;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use mpc_pgm::{DEFAULT_PGM_DATA, Program};

type CliResult<T> = Result<T, Box<dyn Error>>;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let outcome = match args.len() {
        1 => {
            print_usage();
            Ok(())
        }
        2 => match args[1].as_str() {
            "--help" | "-h" => {
                print_help();
                Ok(())
            }
            "--default" => run_verify_default(),
            path => run_verify_file(path),
        },
        3 => match args[1].as_str() {
            "--batch" | "-b" => run_batch_verify(&args[2]),
            _ => Err("invalid arguments, use --help for usage information".into()),
        },
        _ => Err("too many arguments, use --help for usage information".into()),
    };

    if let Err(e) = outcome {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn print_usage() {
    println!("Usage:");
    println!("  Single file:   mpc-pgm <path_to_pgm_file>");
    println!("  Factory image: mpc-pgm --default");
    println!("  Batch mode:    mpc-pgm --batch <directory>");
    println!("  Help:          mpc-pgm --help");
}

fn print_help() {
    println!("mpc-pgm - Akai MPC 1000 program file codec");
    println!();
    println!("USAGE:");
    println!("    mpc-pgm [OPTIONS] <INPUT>");
    println!();
    println!("OPTIONS:");
    println!("    --default            Verify and dump the embedded factory program");
    println!("    --batch, -b <DIR>    Round-trip verify all .pgm files in a directory");
    println!("    --help, -h           Show this help message");
    println!();
    println!("For a single file or --default, the program is parsed, re-serialized,");
    println!("compared byte-for-byte against the input, and dumped field by field.");
}

/// Parse, re-serialize, and byte-compare one program buffer.
fn round_trip(buf: &[u8]) -> CliResult<Program> {
    let program = Program::parse(buf)?;
    let out = program.serialize();
    if out[..] != buf[..Program::SIZE] {
        return Err("round-trip mismatch: serialized output differs from input".into());
    }
    Ok(program)
}

fn run_verify_default() -> CliResult<()> {
    info!("verifying embedded factory program image");
    let program = round_trip(DEFAULT_PGM_DATA)?;
    print!("{program}");
    println!("Round-trip OK ({} bytes)", Program::SIZE);
    Ok(())
}

fn run_verify_file(path: &str) -> CliResult<()> {
    info!("verifying {path}");
    let buf = fs::read(path)?;
    let program = round_trip(&buf)?;
    print!("{program}");
    println!("{path}: round-trip OK ({} bytes)", Program::SIZE);
    Ok(())
}

fn run_batch_verify(directory: &str) -> CliResult<()> {
    let dir_path = Path::new(directory);
    if !dir_path.is_dir() {
        return Err(format!("'{directory}' is not a directory").into());
    }

    let mut pgm_files: Vec<PathBuf> = fs::read_dir(dir_path)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().and_then(|s| s.to_str()) == Some("pgm"))
        .collect();
    pgm_files.sort();

    if pgm_files.is_empty() {
        println!("No .pgm files found in directory: {directory}");
        return Ok(());
    }

    println!("Verifying {} files...", pgm_files.len());

    let progress = ProgressBar::new(pgm_files.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("[{bar:40.cyan/blue}] {pos:>3}/{len:3} files {msg}")?
            .progress_chars("=> "),
    );

    let mut success_count = 0;
    let mut errors = Vec::new();

    for pgm_file in &pgm_files {
        let file_name = pgm_file.file_name().unwrap_or_default().to_string_lossy();
        progress.set_message(file_name.to_string());

        let result = fs::read(pgm_file)
            .map_err(Box::<dyn Error>::from)
            .and_then(|buf| round_trip(&buf));
        match result {
            Ok(_) => success_count += 1,
            Err(e) => {
                let msg = format!("{file_name}: {e}");
                progress.println(format!("FAIL {msg}"));
                errors.push(msg);
            }
        }

        progress.inc(1);
    }

    progress.finish_and_clear();

    println!();
    println!("BATCH SUMMARY:");
    println!("  Verified: {success_count}");
    println!("  Failed:   {}", errors.len());
    println!("  Total:    {}", pgm_files.len());

    if !errors.is_empty() {
        return Err(format!("{} file(s) failed verification", errors.len()).into());
    }
    Ok(())
}
