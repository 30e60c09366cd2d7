use crate::ResponseValue;
use crate::responses::calculator::{evaluate, format_number};
use crate::responses::helpers::{clock_time, coin_flip, dice_roll, long_date, pick, strip_calculate};

const JOKES: &[&str] = &[
    "Why do programmers prefer dark mode? Because light attracts bugs! 🐛",
    "Why did the computer show up at work late? It had a hard drive! 💻",
    "What do you call a group of 8 hobbits? A hobbyte. 😂",
    "Why was the JavaScript developer sad? Because they didn’t Node how to Express themselves!",
];

const FACTS: &[&str] = &[
    "The first computer bug was an actual moth 🦋.",
    "Python is named after Monty Python, not the snake 🐍.",
    "The first 1GB hard drive was announced in 1980 and weighed over 500 pounds ⚙️.",
    "The first website is still online — info.cern.ch 🌐.",
];

const QUOTES: &[&str] = &[
    "\"Talk is cheap. Show me the code.\" — Linus Torvalds",
    "\"Programs must be written for people to read.\" — Harold Abelson",
    "\"The best error message is the one that never shows up.\" — Thomas Fuchs",
    "\"First, solve the problem. Then, write the code.\" — John Johnson",
];

pub const CALCULATE_PROMPT: &str = "Please type what you want me to calculate, e.g., 'calculate 5 + 3 * 2'";
pub const CALCULATE_FAILED: &str = "Sorry, I couldn’t calculate that. Try something simple like 'calculate 12 / 4'.";

/// Built-in base layer.
pub fn base() -> Vec<(&'static str, ResponseValue)> {
    responses! {
        "hello hi" => "Hello! I'm your personal chatbot assistant 😊 How can I help you today?",
        "hi" => "Hi there!👋 How can I help you?",
        "how are you" => "I'm feeling fantastic! Thanks for asking 😄 How about you?",
        "flip a coin" => ResponseValue::computed(|_, ctx| format!("Sure! You got {}.", coin_flip(ctx))),
        "roll a dice" => ResponseValue::computed(|_, ctx| format!("Sure! You got {}", dice_roll(ctx))),
        "what is the date today" => ResponseValue::computed(|_, ctx| format!("Today is {}.", long_date(ctx.now()))),
        "thank" => "No problem! I'm always here to help 😄",
    }
}

/// Built-in supplemental layer. Caller additions are merged on top of it.
pub fn supplemental() -> Vec<(&'static str, ResponseValue)> {
    responses! {
        // identity
        "who developed you" => "I was proudly developed 👨‍💻 by a passionate developer and tech enthusiast!",
        "who created you" => "I was created with 💡 creativity and 💻 code!",
        "who are you" => "I'm an intelligent chatbot built to assist you with fun and useful tasks.",
        "what is your name" => "I'm Chatbot 🤖 — your friendly AI companion!",

        // greetings
        "good morning" => "Good morning ☀️! Let’s make today amazing.",
        "good afternoon" => "Good afternoon 🌤️! Hope your day’s going great.",
        "good night" => "Good night 🌙! Sleep well and recharge for tomorrow.",
        "bye" => "Goodbye! Take care and see you soon 👋",
        "help" => "Here’s what I can do:\n- Flip a coin or roll a dice 🎲\n- Tell the date or time 📅\n- Tell jokes, facts, or quotes 💡\n- Do small math calculations ➕\n- And more coming soon!",

        "what is the time now" => {
            ResponseValue::computed(|_, ctx| format!("The current time is {}", clock_time(ctx.now())))
        },

        "tell me a joke" => ResponseValue::computed(|_, ctx| pick(JOKES, ctx).to_string()),
        "tell me a fact" => ResponseValue::computed(|_, ctx| pick(FACTS, ctx).to_string()),
        "tell me a quote" => ResponseValue::computed(|_, ctx| pick(QUOTES, ctx).to_string()),

        "calculate" => ResponseValue::computed(|message, _| calculate(message)),

        "climate" => "Hmm... I can't access live weather data yet 🌦️, but I'm working on it!",
        "weather" => "Sorry, I don’t have real-time weather info 🌧️, but that’s coming soon!",

        // mood
        "i am sad" => "I’m sorry to hear that 😔 Remember — bad days don’t last forever. You’ve got this 💪",
        "i am happy" => "That’s awesome! 😄 Keep smiling and spreading positive vibes! ✨",
    }
}

fn calculate(message: &str) -> String {
    let expression = strip_calculate(message);
    if expression.is_empty() {
        return CALCULATE_PROMPT.to_string();
    }

    match evaluate(&expression) {
        Ok(value) => format!("The answer is {}", format_number(value)),
        Err(err) => {
            tracing::debug!(%err, expression = expression.as_str(), "calculation failed");
            CALCULATE_FAILED.to_string()
        }
    }
}
