//! Terminal front end for the step-by-step wizard.

use std::path::Path;

use anyhow::Result;
use console::{style, Term};
use thesis_core::{
    BusinessModel, Convention, IdeationHypothesis, Jtbd, JtbdDimensions, ThesisUpdate, WizardStep,
};
use wizard::edits;
use wizard::{StepSequencer, ThesisOracle, WizardError, WizardSession};

use crate::output;

enum Action {
    Next,
    Back,
    Edit,
    Generate,
    Reset,
    Quit,
}

pub struct InteractiveWizard<'a> {
    term: Term,
    session: WizardSession,
    oracle: &'a dyn ThesisOracle,
}

impl<'a> InteractiveWizard<'a> {
    pub fn new(session: WizardSession, oracle: &'a dyn ThesisOracle) -> Self {
        Self {
            term: Term::stdout(),
            session,
            oracle,
        }
    }

    /// Drive the wizard until the user quits; returns the final session.
    pub async fn run(mut self) -> Result<WizardSession> {
        loop {
            let step = self.session.step();
            self.print_header(step)?;

            if step == WizardStep::Manifesto {
                if self.finish()? {
                    self.session.reset();
                    continue;
                }
                return Ok(self.session);
            }

            self.fill(step).await?;

            match self.ask_action(step)? {
                Action::Next => match self.session.advance() {
                    Ok(_) => {}
                    Err(WizardError::IncompleteStep(_)) => {
                        self.say(&format!(
                            "{}",
                            style("This step is not complete yet.").yellow()
                        ))?;
                    }
                    Err(e) => return Err(e.into()),
                },
                Action::Back => {
                    self.session.back()?;
                }
                Action::Edit => {}
                Action::Generate => self.generate().await?,
                Action::Reset => self.session.reset(),
                Action::Quit => return Ok(self.session),
            }
        }
    }

    fn say(&self, line: &str) -> Result<()> {
        self.term.write_line(line)?;
        Ok(())
    }

    fn ask(&self, label: &str) -> Result<String> {
        self.term
            .write_str(&format!("{} ", style(format!("{label}:")).bold()))?;
        Ok(self.term.read_line()?.trim().to_string())
    }

    /// Prompt for a value; an empty answer keeps the current one.
    fn edit(&self, label: &str, current: &str) -> Result<String> {
        let prompt = if current.is_empty() {
            label.to_string()
        } else {
            format!("{label} [{current}]")
        };
        let answer = self.ask(&prompt)?;
        Ok(if answer.is_empty() {
            current.to_string()
        } else {
            answer
        })
    }

    /// One entry per line, ended by an empty line. No entries keeps the
    /// current list.
    fn edit_list(&self, label: &str, current: &[String]) -> Result<Vec<String>> {
        self.say(&format!(
            "{} {}",
            style(label).bold(),
            style("(one per line, empty line to finish)").dim()
        ))?;
        for item in current {
            self.say(&format!("  - {item}"))?;
        }

        let mut lines = Vec::new();
        loop {
            let line = self.term.read_line()?;
            if line.trim().is_empty() {
                break;
            }
            lines.push(line);
        }

        let entered = edits::split_lines(&lines.join("\n"));
        Ok(if entered.is_empty() {
            current.to_vec()
        } else {
            entered
        })
    }

    fn print_header(&self, step: WizardStep) -> Result<()> {
        self.say("")?;
        let progress = StepSequencer::position(step)
            .map(|(n, total)| format!(" ({n}/{total})"))
            .unwrap_or_default();
        self.say(&format!(
            "{}{}",
            style(step.title()).cyan().bold(),
            style(progress).dim()
        ))?;
        if let Some(error) = self.session.error() {
            self.say(&format!("{} {}", style("Last error:").red(), error))?;
        }
        Ok(())
    }

    fn ask_action(&self, step: WizardStep) -> Result<Action> {
        let mut options = vec!["[Enter] next", "[e]dit", "[b]ack", "[r]eset", "[q]uit"];
        if step == WizardStep::Activation {
            options.insert(1, "[g]enerate automatically");
        }
        loop {
            let answer = self.ask(&options.join("  "))?.to_lowercase();
            let action = match answer.as_str() {
                "" | "n" => Action::Next,
                "e" => Action::Edit,
                "b" => Action::Back,
                "r" => Action::Reset,
                "q" => Action::Quit,
                "g" if step == WizardStep::Activation => Action::Generate,
                _ => continue,
            };
            return Ok(action);
        }
    }

    async fn generate(&mut self) -> Result<()> {
        let bar = output::spinner("Running the full strategy protocol...");
        let result = self.session.generate(self.oracle).await;
        bar.finish_and_clear();

        if let Err(e) = result {
            output::print_error(&e.to_string());
        }
        Ok(())
    }

    /// Show the manifesto; true when the user wants a fresh thesis.
    fn finish(&self) -> Result<bool> {
        self.say(&self.session.manifesto())?;
        loop {
            let answer = self
                .ask("[c]opy to clipboard  [s]ave to file  [n]ew thesis  [q]uit")?
                .to_lowercase();
            match answer.as_str() {
                "c" => {
                    output::copy_to_clipboard(&self.session.manifesto());
                }
                "s" => {
                    let path = self.ask("File name")?;
                    if !path.is_empty() {
                        output::write_text(Path::new(&path), &self.session.manifesto())?;
                    }
                }
                "n" => return Ok(true),
                "q" => return Ok(false),
                _ => {}
            }
        }
    }

    async fn fill(&mut self, step: WizardStep) -> Result<()> {
        match step {
            WizardStep::Activation => self.fill_activation(),
            WizardStep::Principles => self.fill_principles().await,
            WizardStep::Conventions => self.fill_conventions(),
            WizardStep::Jtbd => self.fill_jtbd(),
            WizardStep::ProgressForces => {
                let mut forces = self.session.thesis().progress_forces.clone();
                for (label, value) in forces.fields_mut() {
                    *value = self.edit(label, value)?;
                }
                self.session.update(ThesisUpdate::ProgressForces(forces));
                Ok(())
            }
            WizardStep::Pestel => {
                let mut pestel = self.session.thesis().pestel_analysis.clone();
                for (label, value) in pestel.fields_mut() {
                    *value = self.edit(label, value)?;
                }
                self.session.update(ThesisUpdate::PestelAnalysis(pestel));
                Ok(())
            }
            WizardStep::Porter => {
                let mut porter = self.session.thesis().porter_five_forces.clone();
                for (label, value) in porter.fields_mut() {
                    *value = self.edit(label, value)?;
                }
                self.session.update(ThesisUpdate::PorterFiveForces(porter));
                Ok(())
            }
            WizardStep::BlueOcean => {
                let mut grid = self.session.thesis().blue_ocean_strategy.clone();
                for (label, items) in grid.fields_mut() {
                    *items = self.edit_list(label, items)?;
                }
                self.session.update(ThesisUpdate::BlueOceanStrategy(grid));
                Ok(())
            }
            WizardStep::Ideation => self.fill_ideation(),
            WizardStep::Synthesis => self.fill_synthesis(),
            WizardStep::BusinessModel => self.fill_business_models(),
            WizardStep::Selection => self.fill_selection(),
            WizardStep::Summary => self.say(&self.session.summary()),
            WizardStep::Manifesto | WizardStep::Generating => Ok(()),
        }
    }

    fn fill_activation(&mut self) -> Result<()> {
        let thesis = self.session.thesis().clone();
        let updates = [
            ThesisUpdate::ExcavationDomain(
                self.edit("Excavation domain", &thesis.excavation_domain)?,
            ),
            ThesisUpdate::CreatorContext(self.edit("Your context", &thesis.creator_context)?),
            ThesisUpdate::AmbitionLevel(self.edit("Ambition level", &thesis.ambition_level)?),
        ];
        self.session.update_all(updates);
        Ok(())
    }

    async fn fill_principles(&mut self) -> Result<()> {
        let thesis = self.session.thesis().clone();
        let domain = self.edit("Domain", &thesis.domain)?;
        let need = self.edit("Irreducible human need", &thesis.human_need)?;
        self.session.update_all([
            ThesisUpdate::Domain(domain),
            ThesisUpdate::HumanNeed(need),
        ]);

        let thesis = self.session.thesis();
        if !thesis.human_need.trim().is_empty() && thesis.ai_feedback.trim().is_empty() {
            let bar = output::spinner("Asking the coach...");
            let feedback = self.session.request_feedback(self.oracle).await.to_string();
            bar.finish_and_clear();
            self.say(&format!("{} {}", style("Coach:").magenta().bold(), feedback))?;
        }

        let truths = self.edit_list("Fundamental truths", &self.session.thesis().truths)?;
        self.session.update(ThesisUpdate::Truths(truths));
        Ok(())
    }

    fn fill_conventions(&mut self) -> Result<()> {
        if self.session.thesis().conventions.is_empty() {
            let update = edits::add_convention(self.session.thesis());
            self.session.update(update);
        }
        for index in 0..self.session.thesis().conventions.len() {
            self.edit_convention(index)?;
        }

        loop {
            let answer = self.ask("[a]dd another  [d]elete one  [Enter] done")?;
            match ConventionChoice::parse(&answer) {
                Some(ConventionChoice::Add) => {
                    let update = edits::add_convention(self.session.thesis());
                    self.session.update(update);
                    let last = self.session.thesis().conventions.len() - 1;
                    self.edit_convention(last)?;
                }
                Some(ConventionChoice::Delete) => {
                    let answer = self.ask("Convention number to delete")?;
                    let Some(&index) = parse_numbers(&answer).first() else {
                        continue;
                    };
                    match edits::remove_convention(self.session.thesis(), index) {
                        Some(update) => self.session.update(update),
                        None => self.say(&format!(
                            "{}",
                            style("At least one convention must remain.").yellow()
                        ))?,
                    }
                }
                Some(ConventionChoice::Done) => return Ok(()),
                None => {}
            }
        }
    }

    fn edit_convention(&mut self, index: usize) -> Result<()> {
        let mut conventions = self.session.thesis().conventions.clone();
        let Some(convention) = conventions.get_mut(index) else {
            return Ok(());
        };
        let statement = self.edit(&format!("Convention {}", index + 1), &convention.statement)?;
        let counter = self.edit("  Counter-hypothesis", &convention.counter_hypothesis)?;
        *convention = Convention::new(statement, counter);
        self.session.update(ThesisUpdate::Conventions(conventions));
        Ok(())
    }

    fn fill_jtbd(&mut self) -> Result<()> {
        let thesis = self.session.thesis().clone();
        let jtbd = Jtbd {
            context: self.edit("When (context)", &thesis.jtbd.context)?,
            verb: self.edit("help me to (verb)", &thesis.jtbd.verb)?,
            object: self.edit("  (object)", &thesis.jtbd.object)?,
            outcome: self.edit("so I can (outcome)", &thesis.jtbd.outcome)?,
        };
        self.say(&format!("{}", style(jtbd.sentence()).italic()))?;

        let dimensions = JtbdDimensions {
            functional: self.edit("Functional dimension", &thesis.jtbd_dimensions.functional)?,
            emotional: self.edit("Emotional dimension", &thesis.jtbd_dimensions.emotional)?,
            social: self.edit("Social dimension", &thesis.jtbd_dimensions.social)?,
        };

        self.session.update_all([
            ThesisUpdate::Jtbd(jtbd),
            ThesisUpdate::JtbdDimensions(dimensions),
        ]);
        Ok(())
    }

    fn fill_ideation(&mut self) -> Result<()> {
        for (i, hypothesis) in self.session.thesis().ideation_hypotheses.iter().enumerate() {
            self.say(&format!("  {}. [{}] {}", i + 1, hypothesis.source, hypothesis.idea))?;
        }

        loop {
            let idea = self.ask("New hypothesis (empty to finish)")?;
            if idea.is_empty() {
                return Ok(());
            }
            let source = match self.ask("Source: [s]CAMPER or [a]nalogy")?.to_lowercase().as_str() {
                "a" => IdeationHypothesis::ANALOGY,
                _ => IdeationHypothesis::SCAMPER,
            };
            if let Some(update) = edits::add_hypothesis(self.session.thesis(), source, &idea) {
                self.session.update(update);
            }
        }
    }

    fn fill_synthesis(&mut self) -> Result<()> {
        loop {
            let thesis = self.session.thesis();
            for (i, hypothesis) in thesis.ideation_hypotheses.iter().enumerate() {
                let marker = if thesis.selected_hypotheses.contains(&i) {
                    "[x]"
                } else {
                    "[ ]"
                };
                self.say(&format!("  {marker} {}. {}", i + 1, hypothesis.idea))?;
            }

            let answer = self.ask("Toggle numbers (empty to continue)")?;
            let picks = parse_numbers(&answer);
            if picks.is_empty() {
                return Ok(());
            }
            for index in picks {
                let update = edits::toggle_hypothesis(self.session.thesis(), index);
                self.session.update(update);
            }
        }
    }

    fn fill_business_models(&mut self) -> Result<()> {
        let thesis = self.session.thesis().clone();
        for (i, hypothesis) in thesis.selected_hypothesis_details().into_iter().enumerate() {
            let idea = hypothesis.map(|h| h.idea.as_str()).unwrap_or("?");
            self.say(&format!("{} {}", style(format!("Model {}:", i + 1)).bold(), idea))?;

            let mut model: BusinessModel = thesis.business_models.get(i).cloned().unwrap_or_default();
            for (label, value) in model.lean_canvas.fields_mut() {
                *value = self.edit(label, value)?;
            }
            for (label, value) in model.hook_model.fields_mut() {
                *value = self.edit(label, value)?;
            }
            model.flywheel = self.edit("Flywheel", &model.flywheel)?;

            if let Some(update) = edits::set_business_model(self.session.thesis(), i, model) {
                self.session.update(update);
            }
        }
        Ok(())
    }

    fn fill_selection(&mut self) -> Result<()> {
        let thesis = self.session.thesis().clone();
        for (i, model) in thesis.business_models.iter().enumerate() {
            let marker = if thesis.final_thesis.selected_model_index == Some(i) {
                "[x]"
            } else {
                "[ ]"
            };
            self.say(&format!(
                "  {marker} {}. {}",
                i + 1,
                model.lean_canvas.unique_value_proposition
            ))?;
        }

        let answer = self.ask("Chosen model number (empty to keep)")?;
        if let Some(&index) = parse_numbers(&answer).first() {
            match edits::select_model(self.session.thesis(), index) {
                Some(update) => self.session.update(update),
                None => self.say(&format!("{}", style("No such model.").yellow()))?,
            }
        }

        let justification =
            self.edit("Justification", &self.session.thesis().final_thesis.justification)?;
        let update = edits::set_justification(self.session.thesis(), justification);
        self.session.update(update);
        Ok(())
    }
}

#[derive(Debug, PartialEq, Eq)]
enum ConventionChoice {
    Add,
    Delete,
    Done,
}

impl ConventionChoice {
    fn parse(answer: &str) -> Option<Self> {
        match answer.trim().to_lowercase().as_str() {
            "a" | "add" | "y" | "yes" => Some(Self::Add),
            "d" | "delete" => Some(Self::Delete),
            "" | "n" | "no" => Some(Self::Done),
            _ => None,
        }
    }
}

/// 1-based numbers separated by spaces or commas, as 0-based indices.
fn parse_numbers(input: &str) -> Vec<usize> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter_map(|part| part.parse::<usize>().ok())
        .filter_map(|n| n.checked_sub(1))
        .collect()
}
