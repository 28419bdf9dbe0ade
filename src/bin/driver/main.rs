mod args;
mod driver_error;

use args::Args;
use cemi::*;
use clap::Parser;
use driver_error::DriverError;

use std::fs;

fn read_source(args: &Args) -> Result<String, DriverError> {
    fs::read_to_string(&args.input).map_err(|source| DriverError::ReadInput {
        path: args.input.clone(),
        source,
    })
}

fn print_tokens(tokens: &[lexer::LinedToken]) {
    for token in tokens {
        println!("{token}");
    }
}

fn emit_asm(asm: &codegen::AsmProgram, args: &Args) -> Result<(), DriverError> {
    let path = args.output_path();
    fs::write(&path, asm.to_string()).map_err(|source| DriverError::WriteOutput {
        path: path.clone(),
        source,
    })?;
    log::info!("wrote {}", path.display());
    Ok(())
}

pub fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let source = read_source(&args)?;
    let options = CompileOptions {
        assume_int_params: args.assume_int_params,
    };
    let compilation = compile(&source, &options);

    if args.lex {
        print_tokens(&compilation.tokens);
        print!("{}", compilation.diagnostics);
        return Ok(());
    }

    let program = match compilation.ast {
        Ok(program) => program,
        Err(e) => {
            print_tokens(&compilation.tokens);
            print!("{}", compilation.diagnostics);
            return Err(DriverError::from(e).into());
        }
    };

    if args.tree || args.parse {
        print!("{program}");
    }
    if args.parse {
        print!("{}", compilation.diagnostics);
        return Ok(());
    }

    if let Some(asm) = &compilation.asm {
        emit_asm(asm, &args)?;
    }
    print!("{}", compilation.diagnostics);

    Ok(())
}
