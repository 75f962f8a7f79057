use clap::Parser;
use env_logger::Env;
use log::{debug, warn};
use thiserror::Error;

mod libtuvung;

#[cfg(all(feature = "cli", not(feature = "gui")))]
mod cli;
#[cfg(feature = "gui")]
mod gui;

use crate::libtuvung::session::Session;
use crate::libtuvung::source;
use crate::libtuvung::speech;

#[derive(Parser, Debug)]
#[command(name = "Học từ vựng! (Hoctuvung)")]
#[command(version, about, long_about = None)]
struct Args {
    /// Vocabulary service returning the question list as JSON.
    #[arg(
        short,
        long,
        value_name = "URL",
        default_value = "http://159.223.80.140:5555/admin/vocabulary/"
    )]
    endpoint: String,
    #[arg(short, long, default_value = "20")]
    question_count: usize,
    /// Initial speech rate in words per minute.
    #[arg(short, long, default_value = "80")]
    rate: u32,
    #[arg(short, long, default_value = "error")]
    log_level: String,
}

#[derive(Debug, Error)]
enum Error {
    #[cfg(feature = "gui")]
    #[error("cannot start window: {0}")]
    Gui(#[from] eframe::Error),
}

fn main() -> Result<(), Error> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or(args.log_level)).init();

    let source = source::fetch_questions(&args.endpoint);
    if source.is_empty() {
        warn!("[Setup] No questions available, starting with an empty round.");
    }
    let session = Session::create(&source, args.question_count);
    debug!("[Setup] Session ready with {} questions.", session.len());

    let speaker = speech::default_speaker();

    cfg_if::cfg_if! {
        if #[cfg(feature = "gui")] {
            gui::init_gui(
                args.endpoint,
                source,
                args.question_count,
                session,
                speaker,
                args.rate,
            )?;
        } else if #[cfg(feature = "cli")] {
            cli::quiz_loop(
                &args.endpoint,
                source,
                args.question_count,
                session,
                speaker,
                args.rate,
            );
        } else {
            compile_error!("enable at least one of the `gui` or `cli` features");
        }
    }

    Ok(())
}
