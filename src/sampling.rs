//! Random picks for display and template-based opinion generation.
//!
//! Nothing here touches the database; callers pass in what they loaded and an
//! RNG, so the same functions serve handlers (`thread_rng`) and tests (seeded).

use rand::{Rng, seq::SliceRandom};

use crate::entities::{external_review, generated_opinion};

/// Shown when a movie has no generated opinions yet.
pub const FALLBACK_OPINION: &str = "This movie is unreliable... like a unicorn!";

pub const TEMPLATE_METHOD: &str = "template";

const ABSURD_TEMPLATES: &[&str] = &[
    "I cried, I laughed, then I realized I was watching the wrong movie 🎬",
    "This film changed my life. Now I only eat popcorn for breakfast.",
    "The plot twist? My seat was uncomfortable the whole time.",
    "10/10 would watch again, but only if forced at gunpoint 🔫",
    "I transcended to another dimension. Turns out it was just the bathroom.",
    "My popcorn had better character development than the protagonist.",
    "This movie cured my insomnia... by giving me nightmares instead.",
    "I left the theater questioning everything. Mostly why I paid for parking.",
    "The cinematography was stunning. I spent most of the time on my phone though.",
    "This film speaks to the human condition. Specifically, the condition of needing a refund.",
    "A masterpiece of cinema. My cat agreed, she slept through the whole thing.",
    "The director's vision was clear: make me regret all my life choices.",
    "I haven't felt this emotionally connected since my WiFi went down.",
    "The acting was so realistic, I forgot I was supposed to be entertained.",
    "This movie is a metaphor for life: confusing and too long.",
    "I laughed, I cried, I wondered if the exit was still unlocked 🚪",
    "The plot holes were so big, I fell into one and never came back.",
    "My expectations were low, and somehow they still weren't met.",
    "This film challenged everything I know about staying awake.",
    "A visual feast! Unfortunately I was expecting emotional nutrition.",
];

/// Template scores land in `[MIN, MAX)`.
const TEMPLATE_SCORE_MIN: f64 = 7.0;
const TEMPLATE_SCORE_MAX: f64 = 10.0;

pub fn pick_real_review<R: Rng + ?Sized>(
    reviews: &[external_review::Model],
    rng: &mut R,
) -> Option<String> {
    reviews.choose(rng).map(|r| r.content.clone())
}

pub fn pick_fake_opinion<R: Rng + ?Sized>(
    opinions: &[generated_opinion::Model],
    rng: &mut R,
) -> String {
    opinions
        .choose(rng)
        .map(|o| o.content.clone())
        .unwrap_or_else(|| FALLBACK_OPINION.to_string())
}

#[derive(Clone, Debug, PartialEq)]
pub struct TemplateOpinion {
    pub content: &'static str,
    pub absurdity_score: f64,
}

pub fn template_opinion<R: Rng + ?Sized>(rng: &mut R) -> TemplateOpinion {
    let content = ABSURD_TEMPLATES.choose(rng).copied().unwrap_or(FALLBACK_OPINION);
    let absurdity_score = rng.gen_range(TEMPLATE_SCORE_MIN..TEMPLATE_SCORE_MAX);
    TemplateOpinion { content, absurdity_score }
}
