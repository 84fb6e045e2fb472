use apply_sidecars::args::Args;
use apply_sidecars::processor::{Processor, ProcessorOptions};
use apply_sidecars::writer::ExifToolWriter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    // Parse and validate command line arguments
    let args = Args::parse_and_validate()?;

    env_logger::Builder::new()
        .filter_level(args.log_level())
        .format_timestamp(None)
        .init();

    let writer = ExifToolWriter::with_program(&args.exiftool);
    let options = ProcessorOptions {
        delete_sidecars: args.delete_sidecars,
        show_progress: !args.no_progress,
    };

    let mut processor = Processor::new(writer, options);
    let report = processor.process_directory(&args.directory)?;

    report.print();

    Ok(())
}
