//! Terminal front end: outfit rendering and the interactive questionnaire.

use std::io::{self, BufRead, Write};

use crate::models::{FormattedOutfit, ItemQuestionType, QuestionId, UserPreferences};

/// Writes outfits as `Outfit N:` blocks with one line per component
pub fn write_outfits<W: Write>(out: &mut W, outfits: &[FormattedOutfit]) -> io::Result<()> {
    for outfit in outfits {
        writeln!(out, "Outfit {}:", outfit.outfit_number)?;
        for (category, item) in &outfit.components {
            writeln!(out, "  {}: {}", category.label(), item)?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn section_title(question: QuestionId) -> &'static str {
    match question {
        QuestionId::SpecificOccasion => "Specific Occasion",
        QuestionId::Gender => "Gender Preference",
        QuestionId::ItemTypes => "Preferred Item Types",
        QuestionId::StyleVibes => "General Style Vibes",
        QuestionId::FavoriteColors => "Favorite Colors",
        QuestionId::PreferredMaterials => "Preferred Materials",
        QuestionId::KeyOccasions => "Key Occasions",
        QuestionId::PrimarySeasons => "Primary Seasons",
        QuestionId::CasualOutfitStyle => "Casual Outfit Style",
        QuestionId::FormalOutfitColor => "Formal Outfit Color",
    }
}

/// Interactive questionnaire over any line-based input and output
///
/// Options are numbered from 1. Multiple-choice answers are comma-separated
/// numbers; an empty line skips the question. Invalid input is re-prompted.
pub struct Questionnaire<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Questionnaire<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Asks every question and returns the collected preferences
    pub fn run(&mut self) -> anyhow::Result<UserPreferences> {
        writeln!(self.output, "\n==================================================")?;
        writeln!(self.output, "OUTFIT RECOMMENDATION QUESTIONNAIRE")?;
        writeln!(self.output, "==================================================")?;
        writeln!(
            self.output,
            "\nPlease answer the following questions to get personalized outfit recommendations."
        )?;
        writeln!(
            self.output,
            "You can skip any question by pressing Enter without selecting an option."
        )?;

        let mut prefs = UserPreferences::new();
        for question in QuestionId::ALL {
            writeln!(self.output, "\n==== {} ====", section_title(question))?;
            writeln!(self.output, "{}", question.text())?;
            let selection = self.ask(
                question.options(),
                question.allow_multiple(),
                question.max_selections(),
            )?;
            prefs.apply_answer(question, &selection)?;

            if question == QuestionId::PrimarySeasons {
                self.ask_item_specific(&mut prefs)?;
            }
        }

        Ok(prefs)
    }

    fn ask_item_specific(&mut self, prefs: &mut UserPreferences) -> anyhow::Result<()> {
        if prefs.item_types.is_empty() {
            return Ok(());
        }

        writeln!(self.output, "\n==== Item-Specific Preferences ====")?;
        writeln!(
            self.output,
            "Let's get some more specific preferences for each item you selected."
        )?;

        for item in prefs.item_types.clone() {
            writeln!(self.output, "\n--- Preferences for {} ---", item)?;
            for question_type in ItemQuestionType::ALL {
                writeln!(self.output, "{}", question_type.text(&item))?;
                let selection =
                    self.ask(question_type.options(), true, question_type.max_selections())?;
                prefs.apply_item_answer(&item, question_type, &selection)?;
            }
        }
        Ok(())
    }

    fn print_options(&mut self, options: &[&str], allow_multiple: bool) -> io::Result<()> {
        for (i, option) in options.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, option)?;
        }
        if allow_multiple {
            writeln!(
                self.output,
                "\nYou can select multiple options by entering numbers separated by commas,"
            )?;
            writeln!(
                self.output,
                "or press Enter without a number to skip this question."
            )?;
        } else {
            writeln!(
                self.output,
                "\nEnter a number or press Enter to skip this question."
            )?;
        }
        Ok(())
    }

    /// Prompts until a valid selection is entered; end of input skips
    fn ask(
        &mut self,
        options: &[&str],
        allow_multiple: bool,
        max_selections: Option<usize>,
    ) -> io::Result<Vec<String>> {
        self.print_options(options, allow_multiple)?;

        loop {
            write!(self.output, "Your selection: ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(Vec::new());
            }
            let line = line.trim();
            if line.is_empty() {
                return Ok(Vec::new());
            }

            let numbers: Result<Vec<usize>, _> = line
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::parse::<usize>)
                .collect();

            let numbers = match numbers {
                Ok(numbers) if allow_multiple || numbers.len() == 1 => numbers,
                _ => {
                    writeln!(self.output, "Please enter valid number(s).")?;
                    continue;
                }
            };

            if numbers.iter().any(|n| *n < 1 || *n > options.len()) {
                writeln!(
                    self.output,
                    "Please enter valid numbers between 1 and {}.",
                    options.len()
                )?;
                continue;
            }

            if let Some(max) = max_selections {
                if numbers.len() > max {
                    writeln!(self.output, "Please select at most {} options.", max)?;
                    continue;
                }
            }

            return Ok(numbers
                .into_iter()
                .map(|n| options[n - 1].to_string())
                .collect());
        }
    }
}
