//! The five-statement personality questionnaire and the game catalog offered at
//! registration.

use crate::core::models::participant::game_key;
use thiserror::Error;

/// Games members can pick from when registering.
pub const GAME_CATALOG: [&str; 7] = [
    "FIFA",
    "Valorant",
    "CS:GO",
    "DOTA 2",
    "Basketball",
    "Chess",
    "Badminton",
];

/// Statements answered on a scale from 1 (strongly disagree) to 5 (strongly agree).
pub const SURVEY_QUESTIONS: [&str; 5] = [
    "I enjoy taking the lead and guiding others during group activities.",
    "I prefer analyzing situations and coming up with strategic solutions.",
    "I work well with others and enjoy collaborative teamwork.",
    "I am calm under pressure and can help maintain team morale.",
    "I like making quick decisions and adapting in dynamic situations.",
];

pub const MIN_ANSWER: u8 = 1;
pub const MAX_ANSWER: u8 = 5;

const SCORE_SCALE: u32 = 4;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SurveyError {
    #[error("Expected {expected} answers, got {actual}")]
    WrongAnswerCount { expected: usize, actual: usize },
    #[error("Answer {value} to question {question} must be between 1 and 5")]
    AnswerOutOfRange { question: usize, value: i64 },
    #[error("Answer '{0}' is not a number")]
    NotANumber(String),
}

/// Converts survey answers into a personality score between 20 and 100.
pub fn score_answers(answers: &[u8]) -> Result<u32, SurveyError> {
    if answers.len() != SURVEY_QUESTIONS.len() {
        return Err(SurveyError::WrongAnswerCount {
            expected: SURVEY_QUESTIONS.len(),
            actual: answers.len(),
        });
    }
    let mut total = 0u32;
    for (index, &answer) in answers.iter().enumerate() {
        if !(MIN_ANSWER..=MAX_ANSWER).contains(&answer) {
            return Err(SurveyError::AnswerOutOfRange {
                question: index + 1,
                value: i64::from(answer),
            });
        }
        total += u32::from(answer);
    }
    Ok(total * SCORE_SCALE)
}

/// Parses a comma-separated answer list such as `"5,4,3,4,5"`.
pub fn parse_answers(raw: &str) -> Result<Vec<u8>, SurveyError> {
    raw.split(',')
        .map(str::trim)
        .enumerate()
        .map(|(index, token)| {
            let value: i64 = token
                .parse()
                .map_err(|_| SurveyError::NotANumber(token.to_string()))?;
            u8::try_from(value).map_err(|_| SurveyError::AnswerOutOfRange {
                question: index + 1,
                value,
            })
        })
        .collect()
}

/// Returns the catalog spelling of `game`, matching case-insensitively.
pub fn catalog_game(game: &str) -> Option<&'static str> {
    GAME_CATALOG
        .iter()
        .copied()
        .find(|known| game_key(known) == game_key(game.trim()))
}
