//! Growth mindset quiz and its scoring rule.

use serde::Serialize;

use crate::identity::Identity;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Question {
    pub text: &'static str,
    pub options: [&'static str; 4],
    #[serde(skip)]
    pub correct: &'static str,
}

pub const QUESTIONS: [Question; 6] = [
    Question {
        text: "Q1: What should you do when you make a mistake?",
        options: ["Ignore it", "Learn from it", "Give up", "Blame others"],
        correct: "Learn from it",
    },
    Question {
        text: "Q2: Growth mindset believes abilities are:",
        options: ["Fixed", "Developable", "Inherited", "Random"],
        correct: "Developable",
    },
    Question {
        text: "Q3: Which action shows a growth mindset?",
        options: [
            "Giving up",
            "Avoiding feedback",
            "Learning from failure",
            "Blaming others",
        ],
        correct: "Learning from failure",
    },
    Question {
        text: "Q4: What is the best way to improve a skill?",
        options: [
            "Practice regularly",
            "Avoid challenges",
            "Rely on talent only",
            "Never seek feedback",
        ],
        correct: "Practice regularly",
    },
    Question {
        text: "Q5: What should you do when faced with a tough challenge?",
        options: [
            "Give up",
            "Seek help and keep trying",
            "Blame others",
            "Ignore it",
        ],
        correct: "Seek help and keep trying",
    },
    Question {
        text: "Q6: How can feedback help you grow?",
        options: [
            "It doesn't help",
            "It shows your weaknesses",
            "It guides you to improve",
            "It lowers confidence",
        ],
        correct: "It guides you to improve",
    },
];

pub const QUESTION_COUNT: usize = QUESTIONS.len();

#[derive(Debug, Clone, Serialize)]
pub struct QuestionFeedback {
    pub index: usize,
    pub selected: Option<String>,
    pub correct_answer: &'static str,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizResult {
    pub feedback: Vec<QuestionFeedback>,
    pub score: usize,
    pub total: usize,
}

impl QuizResult {
    pub fn final_message(&self, identity: &Identity) -> String {
        format!(
            "{}, Your Final Quiz Score: {}/{}",
            identity.display(),
            self.score,
            self.total
        )
    }
}

/// Score the selected options. Position `i` answers question `i`; missing
/// positions are unanswered. Only an exact match with the correct option counts.
pub fn evaluate(answers: &[Option<String>]) -> QuizResult {
    let feedback: Vec<QuestionFeedback> = QUESTIONS
        .iter()
        .enumerate()
        .map(|(index, question)| {
            let selected = answers.get(index).cloned().flatten();
            let is_correct = selected.as_deref() == Some(question.correct);
            QuestionFeedback {
                index,
                selected,
                correct_answer: question.correct,
                is_correct,
            }
        })
        .collect();
    let score = feedback.iter().filter(|f| f.is_correct).count();
    QuizResult {
        feedback,
        score,
        total: QUESTION_COUNT,
    }
}
