use colored::Colorize;
use log::debug;
use text_io::read;

use crate::libtuvung::session::{Question, Session};
use crate::libtuvung::source;
use crate::libtuvung::speech::Speaker;

pub fn quiz_loop(
    endpoint: &str,
    mut source: Vec<Question>,
    requested: usize,
    mut session: Session,
    mut speaker: Box<dyn Speaker>,
    rate: u32,
) {
    loop {
        while !session.is_finished() {
            let Some(question) = session.current_question() else {
                break;
            };
            let term = question.term.clone();
            let hint = question.voice_hint.clone();

            let leading = format!("{}/{}. ", session.position() + 1, session.len());
            println!("{}{}", leading.cyan(), term.clone().black().bold().on_white());
            print!(
                "{} ",
                "Answer (`!s` to hear the question, `q` to quit early):".cyan()
            );
            let line: String = read!("{}\n");
            debug!("[Cli] Input {:?}", line);

            match line.trim() {
                "q" => {
                    println!("{}", "Quitting Early!".cyan());
                    return;
                }
                "!s" => speaker.speak(&term, &hint, rate),
                answer => {
                    if let Some(result) = session.submit_answer(answer) {
                        if result.correct {
                            println!("{}", "Correct!".bright_green());
                        } else {
                            println!(
                                "{}",
                                format!(
                                    "Incorrect. The correct answer is '{}'.",
                                    result.expected
                                )
                                .bright_red()
                            );
                        }
                    }
                }
            }
        }

        if session.is_empty() {
            println!(
                "{}",
                "No questions available. Check the vocabulary endpoint!".yellow()
            );
        } else {
            let (correct, total) = session.score();
            println!(
                "{}",
                format!("Final score: {}/{}", correct, total).cyan().bold()
            );
        }

        print!("{} ", "Play again? (y/n):".cyan());
        let line: String = read!("{}\n");
        if !line.trim().eq_ignore_ascii_case("y") {
            return;
        }
        source = source::refresh_questions(endpoint, source);
        session = Session::create(&source, requested);
    }
}
