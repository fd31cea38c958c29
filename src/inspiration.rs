//! Motivational quotes, growth tips and other fixed page content.

use rand::seq::SliceRandom;
use rand::Rng;

pub const QUOTES: [&str; 10] = [
    "Believe you can and you're halfway there.",
    "Mistakes are proof that you are trying.",
    "Growth is never by mere chance; it is the result of forces working together.",
    "Success is the ability to go from one failure to another with no loss of enthusiasm.",
    "Don't watch the clock; do what it does. Keep going.",
    "Your potential is endless.",
    "💪 Push your limits every single day.",
    "🌟 Great things never come from comfort zones.",
    "🚀 Every day is a chance to get better.",
    "🌈 Embrace challenges; they are opportunities in disguise.",
];

pub const TIPS: [&str; 9] = [
    "💡 Set small, achievable learning goals.",
    "🔄 Reflect daily on your progress.",
    "🤔 Ask questions when stuck.",
    "🎯 Challenge yourself with new tasks.",
    "📚 Read about successful growth stories.",
    "🤝 Collaborate and learn with peers.",
    "🕒 Dedicate time daily to self-improvement.",
    "🔥 Stay consistent; small steps lead to big results.",
    "🌟 Visualize your success and work towards it.",
];

pub const VIDEO_URL: &str = "https://www.youtube.com/watch?v=75GFzikmRY0";

pub const FOOTER: &str =
    "Believe in your infinite potential. Your only limitations are those you set upon yourself.";

pub fn random_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(&QUOTES, rng)
}

pub fn random_tip<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(&TIPS, rng)
}

fn pick<R: Rng + ?Sized>(pool: &[&'static str], rng: &mut R) -> &'static str {
    // Pools are non-empty constants.
    pool.choose(rng).copied().unwrap_or_default()
}
