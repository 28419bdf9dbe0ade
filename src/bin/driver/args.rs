use clap::Parser;
use std::path::PathBuf;

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Parser)]
#[command(name = "cemi", version, about = "Compiles a small imperative language into pseudo-assembly")]
pub struct Args {
    /// Print the token stream and stop
    #[arg(long)]
    pub lex: bool,

    /// Print the syntax tree and stop
    #[arg(long)]
    pub parse: bool,

    /// Print the syntax tree before generating code
    #[arg(long)]
    pub tree: bool,

    /// Treat unresolved identifiers inside a function body as `int`
    #[arg(long)]
    pub assume_int_params: bool,

    /// Where to write the listing [default: INPUT with the `asm` extension]
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    pub input: PathBuf,
}

impl Args {
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let mut out = self.input.clone();
            out.set_extension("asm");
            out
        })
    }
}
