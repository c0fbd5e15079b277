//! The four fixed questionnaire steps.

use serde::Serialize;

use crate::analysis::Category;

/// One question shown to the patient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
    pub step: u8,
    pub category: Category,
    pub title: &'static str,
    pub text: &'static str,
}

pub const QUESTIONS: [Question; 4] = [
    Question {
        step: 1,
        category: Category::Cardiac,
        title: "Cardiac Symptoms Assessment",
        text: "Since your heart attack, have you experienced any chest pain, discomfort, or \
               unusual sensations in your chest area? Please describe any chest discomfort, \
               including when it occurs, how severe it is on a scale of 1 to 10, and what \
               triggers it.",
    },
    Question {
        step: 2,
        category: Category::Respiratory,
        title: "Breathing and Physical Symptoms",
        text: "How is your breathing? Have you experienced any shortness of breath, difficulty \
               breathing during normal activities, or while resting? Do you have any swelling \
               in your legs, ankles, or feet?",
    },
    Question {
        step: 3,
        category: Category::Medication,
        title: "Medication and Side Effects",
        text: "Are you taking all your prescribed heart medications as directed? Have you \
               experienced any side effects from your medications such as dizziness, nausea, \
               unusual bleeding, or any other concerning symptoms?",
    },
    Question {
        step: 4,
        category: Category::Activity,
        title: "Activity Tolerance and Fatigue",
        text: "How is your energy level and ability to perform daily activities? Can you climb \
               stairs, walk distances, or do household chores without excessive fatigue or \
               chest discomfort?",
    },
];

/// The question asked for a category
pub fn question_for(category: Category) -> &'static Question {
    // QUESTIONS lists every category exactly once, in Category::ALL order
    &QUESTIONS[Category::ALL
        .iter()
        .position(|c| *c == category)
        .unwrap_or_default()]
}
