use std::path::{Path, PathBuf};

use clap::Parser;

use vasm::assembler::{self, AssembleOutcome};
use vasm::cli::CliArgs;
use vasm::logging;

fn main() {
    let args = CliArgs::parse();
    std::process::exit(run(&args));
}

fn run(args: &CliArgs) -> i32 {
    let source_path = format!("{}.as", args.input);

    if args.verbose {
        logging::verbose(&format!("opening {source_path}"));
    }

    let outcome = match assembler::assemble_from_file(&source_path) {
        Ok(outcome) => outcome,
        Err(err) => {
            logging::error(err.to_string());
            return 2;
        }
    };

    match outcome {
        AssembleOutcome::Diagnostics { diagnostics, expanded_source } => {
            for d in &diagnostics {
                logging::diagnostic(d);
            }

            if !args.check {
                if let Err(err) = write_file(args, "am", &expanded_source) {
                    logging::error(err.to_string());
                    return 2;
                }
            }

            logging::summary(diagnostics.len());
            1
        }
        AssembleOutcome::Success(program) => {
            if args.check {
                logging::summary(0);
                return 0;
            }

            if let Err(err) = write_outputs(args, &program) {
                logging::error(err.to_string());
                return 2;
            }

            logging::summary(0);
            0
        }
    }
}

/// Writes the expanded `.am` stream unconditionally, then the object
/// file and the non-empty entry/extern listings. The reference opens
/// and writes `.am` during pass 1 regardless of whether pass 1
/// ultimately reports errors, so a failed assembly still leaves a
/// usable expanded source behind — only the `.ob`/`.ent`/`.ext`
/// "artefacts" are withheld on failure.
fn write_outputs(args: &CliArgs, program: &assembler::AssembledProgram) -> Result<(), assembler::error::IoFailure> {
    write_file(args, "am", &program.expanded_source)?;
    write_file(args, "ob", &program.object_lines.join("\n"))?;

    if !program.entry_lines.is_empty() {
        write_file(args, "ent", &program.entry_lines.join("\n"))?;
    }
    if !program.extern_lines.is_empty() {
        write_file(args, "ext", &program.extern_lines.join("\n"))?;
    }

    Ok(())
}

fn write_file(args: &CliArgs, extension: &str, contents: &str) -> Result<(), assembler::error::IoFailure> {
    let path = output_path(args, extension);
    if args.verbose {
        logging::verbose(&format!("writing {}", path.display()));
    }
    std::fs::write(&path, format!("{contents}\n")).map_err(|source| {
        assembler::error::IoFailure::WriteOutput { path: path.display().to_string(), source }
    })
}

fn output_path(args: &CliArgs, extension: &str) -> PathBuf {
    let input_path = Path::new(&args.input);
    let file_name = input_path.file_name().unwrap_or_default();

    let dir = match &args.output_dir {
        Some(dir) => PathBuf::from(dir),
        None => input_path.parent().map(Path::to_path_buf).unwrap_or_default(),
    };

    dir.join(file_name).with_extension(extension)
}
