//! Command-line argument surface for the assembler driver.

use clap::Parser;

#[derive(Parser)]
#[clap(author, version, about)]
pub struct CliArgs {
    /// The source file to assemble, without its `.as` extension
    #[clap(value_parser)]
    pub input: String,

    /// Directory to write the `.am`/`.ob`/`.ent`/`.ext` files into
    /// (defaults to the input file's own directory)
    #[clap(short = 'o', long = "output-dir")]
    pub output_dir: Option<String>,

    /// Run both passes without writing any output file
    #[clap(short = 'c', long = "check", action)]
    pub check: bool,

    /// Log each file opened or written, and a final summary
    #[clap(short = 'v', long = "verbose", action)]
    pub verbose: bool,
}
