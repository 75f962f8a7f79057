use eframe::egui;
use eframe::egui::{Align, Color32, Key, Layout, RichText};
use log::debug;

use crate::libtuvung::session::{MatchResult, Question, Session};
use crate::libtuvung::source;
use crate::libtuvung::speech::Speaker;
use crate::Error;

struct GuiState {
    endpoint: String,
    source: Vec<Question>,
    requested: usize,
    session: Session,
    speaker: Box<dyn Speaker>,

    answer_input: String,
    rate_input: String,
    rate: u32,
    feedback: Option<MatchResult>,
}

impl GuiState {
    fn new(
        endpoint: String,
        source: Vec<Question>,
        requested: usize,
        session: Session,
        speaker: Box<dyn Speaker>,
        rate: u32,
    ) -> Self {
        Self {
            endpoint,
            source,
            requested,
            session,
            speaker,

            answer_input: String::new(),
            rate_input: rate.to_string(),
            rate,
            feedback: None,
        }
    }

    fn check_answer(&mut self) {
        if let Some(result) = self.session.submit_answer(&self.answer_input) {
            self.feedback = Some(result);
        }
        self.answer_input.clear();
    }

    fn restart(&mut self) {
        debug!("[Gui] Restarting with {} questions.", self.requested);
        self.source = source::refresh_questions(&self.endpoint, std::mem::take(&mut self.source));
        self.session = Session::create(&self.source, self.requested);
        self.answer_input.clear();
        self.feedback = None;
    }

    fn set_rate_from_input(&mut self) {
        // Anything that does not parse keeps the previous rate.
        if let Ok(rate) = self.rate_input.trim().parse::<u32>() {
            self.rate = rate;
        }
    }

    fn speak_question(&mut self) {
        let Some(question) = self.session.current_question() else {
            return;
        };
        let text = question.term.clone();
        let hint = question.voice_hint.clone();
        self.speaker.speak(&text, &hint, self.rate);
    }

    fn speak_answer(&mut self) {
        let Some(question) = self.session.current_question() else {
            return;
        };
        let text = question.translation.clone();
        let hint = question.voice_hint.clone();
        self.speaker.speak(&text, &hint, self.rate);
    }

    fn copy_question(&self, ctx: &egui::Context) {
        if let Some(question) = self.session.current_question() {
            ctx.copy_text(question.term.clone());
        }
    }

    fn score_line(&self) -> String {
        let (correct, answered) = self.session.score();
        if self.session.is_finished() {
            format!("Final score: {}/{}", correct, self.session.len())
        } else {
            format!("Score: {}/{}", correct, answered)
        }
    }

    fn draw_prompt(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            if self.session.is_empty() {
                ui.label(RichText::new("No questions available.").size(24.0));
                ui.label("Check the vocabulary endpoint, then Restart to try again.");
            } else if self.session.is_finished() {
                ui.label(RichText::new(self.score_line()).size(24.0));
                ui.label("Do you want to play again?");
            } else if let Some(question) = self.session.current_question() {
                ui.label(RichText::new(question.term.clone()).size(40.0));
            }
        });
    }

    fn draw_feedback(&self, ui: &mut egui::Ui) {
        if let Some(feedback) = &self.feedback {
            ui.vertical_centered(|ui| {
                if feedback.correct {
                    ui.label(RichText::new("Correct!").color(Color32::DARK_GREEN));
                } else {
                    ui.label(
                        RichText::new(format!(
                            "Incorrect. The correct answer is '{}'.",
                            feedback.expected
                        ))
                        .color(Color32::DARK_RED),
                    );
                }
            });
        }
    }
}

impl eframe::App for GuiState {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("overflow_menu").show(ctx, |ui| {
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                ui.menu_button("\u{2630}", |ui| {
                    if ui.button("Speak Question").clicked() {
                        self.speak_question();
                        ui.close_menu();
                    }
                    if ui.button("Speak Answer").clicked() {
                        self.speak_answer();
                        ui.close_menu();
                    }
                    if ui.button("Copy Question").clicked() {
                        self.copy_question(ctx);
                        ui.close_menu();
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_prompt(ui);
            ui.add_space(8.0);

            let in_progress = !self.session.is_finished();
            let mut submitted = false;

            let answer = ui.add_enabled(
                in_progress,
                egui::TextEdit::singleline(&mut self.answer_input)
                    .hint_text("Answer")
                    .desired_width(f32::INFINITY),
            );
            if answer.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                self.check_answer();
                submitted = true;
                answer.request_focus();
            }

            let rate = ui.add(
                egui::TextEdit::singleline(&mut self.rate_input)
                    .hint_text("Tốc độ đọc (từ/phút)")
                    .desired_width(f32::INFINITY),
            );
            if rate.changed() {
                self.set_rate_from_input();
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui
                    .add_enabled(in_progress, egui::Button::new("Copy"))
                    .clicked()
                {
                    self.copy_question(ctx);
                }
                if ui
                    .add_enabled(in_progress, egui::Button::new("Check"))
                    .clicked()
                {
                    self.check_answer();
                    submitted = true;
                }
                if ui
                    .add_enabled(in_progress, egui::Button::new("Speak"))
                    .clicked()
                {
                    self.speak_question();
                }
                if ui
                    .add_enabled(in_progress, egui::Button::new("Speak Answer"))
                    .clicked()
                {
                    self.speak_answer();
                }
                if ui
                    .add_enabled(!in_progress, egui::Button::new("Restart"))
                    .clicked()
                {
                    self.restart();
                }
            });

            // Enter on the finished screen restarts, but not on the same
            // frame the last answer was submitted.
            if self.session.is_finished() && !submitted && ui.input(|i| i.key_pressed(Key::Enter)) {
                self.restart();
            }

            ui.add_space(8.0);
            self.draw_feedback(ui);
            ui.vertical_centered(|ui| {
                ui.label(self.score_line());
            });
        });
    }
}

pub fn init_gui(
    endpoint: String,
    source: Vec<Question>,
    requested: usize,
    session: Session,
    speaker: Box<dyn Speaker>,
    rate: u32,
) -> Result<(), Error> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([500.0, 250.0])
            .with_min_inner_size([400.0, 220.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Học từ vựng!",
        native_options,
        Box::new(move |_cc| {
            Ok(Box::new(GuiState::new(
                endpoint, source, requested, session, speaker, rate,
            )))
        }),
    )?;

    Ok(())
}
