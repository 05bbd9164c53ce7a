mod annotate_cmd;
mod cli;
mod fields_cmd;
mod fill_cmd;
mod markers_cmd;
mod page_range;
mod shared;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        cli::Commands::Fill {
            ref file,
            ref output,
            ref options,
            ref marker_prefix,
            max_input_bytes,
            ref format,
        } => fill_cmd::run(
            file,
            output,
            options.as_deref(),
            marker_prefix.as_deref(),
            max_input_bytes,
            format,
        ),
        cli::Commands::Markers {
            ref file,
            ref pages,
            ref marker_prefix,
            ref format,
        } => markers_cmd::run(file, pages.as_deref(), marker_prefix.as_deref(), format),
        cli::Commands::Annotate {
            ref file,
            ref output,
            ref options_out,
            ref marker_prefix,
        } => annotate_cmd::run(
            file,
            output,
            options_out.as_deref(),
            marker_prefix.as_deref(),
        ),
        cli::Commands::Fields {
            ref file,
            ref format,
        } => fields_cmd::run(file, format),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
