use serde::{Deserialize, Serialize};

/// An ordered, immutable set of interview questions for one company persona.
///
/// Selected once at session start and fixed for the session's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSet {
    /// Company/persona identifier (e.g. "amazon")
    pub company: String,

    /// Ordered question prompts
    questions: Vec<String>,
}

impl QuestionSet {
    /// Build a custom question set
    pub fn new(company: impl Into<String>, questions: Vec<String>) -> Self {
        Self {
            company: company.into(),
            questions,
        }
    }

    /// Look up one of the built-in company banks (case-insensitive)
    pub fn builtin(company: &str) -> Option<Self> {
        let key = company.trim().to_lowercase();
        BUILTIN_BANKS
            .iter()
            .find(|(id, _)| *id == key)
            .map(|(id, questions)| Self {
                company: (*id).to_string(),
                questions: questions.iter().map(|q| (*q).to_string()).collect(),
            })
    }

    /// Identifiers of all built-in banks
    pub fn companies() -> Vec<&'static str> {
        BUILTIN_BANKS.iter().map(|(id, _)| *id).collect()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.questions.get(index).map(String::as_str)
    }

    pub fn questions(&self) -> &[String] {
        &self.questions
    }
}

/// Built-in behavioral question banks, one per target company.
const BUILTIN_BANKS: &[(&str, &[&str])] = &[
    (
        "amazon",
        &[
            "Describe a time when you used data to make a decision.",
            "Tell me about a time you disagreed with your manager. How did you handle it?",
            "Describe a situation where you had to prioritize multiple tasks.",
            "Give an example of when you went above and beyond for a customer.",
            "How do you handle tight deadlines while maintaining quality?",
        ],
    ),
    (
        "t-mobile",
        &[
            "How would you handle a dissatisfied customer?",
            "Tell me about a time you collaborated with a team to meet a goal.",
            "Describe a situation where innovation led to success.",
            "How do you keep yourself motivated in a fast-paced environment?",
            "What does the T-Mobile brand mean to you?",
        ],
    ),
    (
        "atlassian",
        &[
            "Describe a time when you improved a process or workflow.",
            "How do you handle feedback from multiple stakeholders?",
            "Tell me about a technical project you're proud of.",
            "How do you ensure collaboration within distributed teams?",
            "Which Atlassian product do you admire and why?",
        ],
    ),
    (
        "elevenlabs",
        &[
            "What excites you about voice AI and speech synthesis?",
            "Tell me about a project where you used AI or ML tools.",
            "Describe a time when creativity helped you solve a technical challenge.",
            "How would you evaluate the quality of generated voice data?",
            "How do you stay current with advances in AI research?",
        ],
    ),
    (
        "statsig",
        &[
            "What is your experience with A/B testing or experimentation?",
            "Tell me about a time you used data to validate an assumption.",
            "How would you design an experiment to test a new product feature?",
            "Describe a situation where data contradicted your expectations.",
            "How would you explain statistical significance to a non-technical audience?",
        ],
    ),
];
