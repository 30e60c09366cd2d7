use crate::responses::builtin::{self, CALCULATE_FAILED, CALCULATE_PROMPT};
use crate::{Clock, Context, Options, Resolver, ResponseValue, similarity};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

fn reference_context(seed: u64) -> Context {
    let date = NaiveDate::from_ymd_opt(2025, 10, 7).unwrap();
    let time = NaiveTime::from_hms_opt(15, 4, 5).unwrap();
    Context::new(Clock::Fixed(NaiveDateTime::new(date, time)), seed)
}

fn resolver(seed: u64) -> Resolver {
    Resolver::new().with_context(reference_context(seed))
}

#[test]
fn builtin_static_examples_matching() {
    // Array of (input, expected reply)
    let cases: Vec<(&str, &str)> = vec![
        ("hi", "Hi there!👋 How can I help you?"),
        ("Hello", "Hello! I'm your personal chatbot assistant 😊 How can I help you today?"),
        ("helo", "Hello! I'm your personal chatbot assistant 😊 How can I help you today?"),
        ("how are you?", "I'm feeling fantastic! Thanks for asking 😄 How about you?"),
        ("thanks", "No problem! I'm always here to help 😄"),
        ("Who are you", "I'm an intelligent chatbot built to assist you with fun and useful tasks."),
        ("what's your name", "I'm Chatbot 🤖 — your friendly AI companion!"),
        ("good morning!", "Good morning ☀️! Let’s make today amazing."),
        ("Good Night", "Good night 🌙! Sleep well and recharge for tomorrow."),
        ("bye", "Goodbye! Take care and see you soon 👋"),
        ("weather", "Sorry, I don’t have real-time weather info 🌧️, but that’s coming soon!"),
        ("i am so sad", "I’m sorry to hear that 😔 Remember — bad days don’t last forever. You’ve got this 💪"),
        ("I am happy", "That’s awesome! 😄 Keep smiling and spreading positive vibes! ✨"),
    ];

    let mut resolver = resolver(1);
    for (input, expected) in cases {
        assert_eq!(resolver.resolve(input), expected, "input: {input}");
    }
}

#[test]
fn help_lists_capabilities() {
    let reply = resolver(1).resolve("help");
    assert!(reply.starts_with("Here’s what I can do:"));
    assert!(reply.contains("Flip a coin"));
}

#[test]
fn unrelated_messages_fall_back() {
    let mut resolver = resolver(1);
    for input in ["zzzz", "qwxv", "xyzzy plugh", "?!", "k"] {
        assert_eq!(resolver.resolve(input), Options::UNSUCCESSFUL, "input: {input}");
    }
}

#[test]
fn every_builtin_key_resolves_to_its_own_reply() {
    let registry = Resolver::new().registry().clone();
    for (key, value) in registry.effective().iter() {
        let ranking = crate::rank(key.as_str(), registry.effective().keys()).unwrap();
        assert_eq!(ranking.best().target, key.as_str());

        // Same seed and clock on both sides, so computed replies line up too.
        let expected = crate::engine::produce(value, key.as_str(), &mut reference_context(1));
        assert_eq!(resolver(1).resolve(key.as_str()), expected, "key: {key}");
    }
}

#[test]
fn whitespace_differences_do_not_matter() {
    assert_eq!(resolver(1).resolve("goodnight"), "Good night 🌙! Sleep well and recharge for tomorrow.");
    assert_eq!(resolver(1).resolve("howareyou"), "I'm feeling fantastic! Thanks for asking 😄 How about you?");
    assert_eq!(resolver(4).resolve("  Tell  me a   joke "), resolver(4).resolve("tell me a joke"));
    assert_eq!(resolver(1).resolve("what is the date\ttoday"), "Today is October 7, 2025.");
}

#[test]
fn builtin_layers_have_expected_order() {
    let base: Vec<&str> = builtin::base().into_iter().map(|(k, _)| k).collect();
    assert_eq!(
        base,
        vec!["hello hi", "hi", "how are you", "flip a coin", "roll a dice", "what is the date today", "thank"]
    );

    let resolver = Resolver::new();
    let effective: Vec<String> = resolver.registry().effective().keys().map(|k| k.to_string()).collect();
    assert_eq!(effective.len(), base.len() + builtin::supplemental().len());
    assert_eq!(effective[..base.len()], base[..]);
    assert_eq!(effective.last().map(String::as_str), Some("i am happy"));
}

#[test]
fn date_and_time_use_the_context_clock() {
    let mut resolver = resolver(1);
    assert_eq!(resolver.resolve("what is the date today"), "Today is October 7, 2025.");
    assert_eq!(resolver.resolve("whats the date today"), "Today is October 7, 2025.");
    assert_eq!(resolver.resolve("what is the time now"), "The current time is 3:04:05 PM");
}

#[test]
fn coin_and_dice_are_reproducible_with_a_seed() {
    for seed in 0..8 {
        let mut a = resolver(seed);
        let mut b = resolver(seed);
        for _ in 0..4 {
            let coin = a.resolve("flip a coin");
            assert_eq!(coin, b.resolve("flip a coin"));
            assert!(coin == "Sure! You got heads." || coin == "Sure! You got tails.", "{coin}");

            let dice = a.resolve("roll a dice");
            assert_eq!(dice, b.resolve("roll a dice"));
            let face: u8 = dice.trim_start_matches("Sure! You got ").parse().unwrap();
            assert!((1..=6).contains(&face));
        }
    }
}

#[test]
fn coin_lands_on_both_sides_eventually() {
    let mut resolver = resolver(3);
    let flips: Vec<String> = (0..64).map(|_| resolver.resolve("flip a coin")).collect();
    assert!(flips.iter().any(|f| f.ends_with("heads.")));
    assert!(flips.iter().any(|f| f.ends_with("tails.")));
}

#[test]
fn jokes_facts_and_quotes_come_from_their_lists() {
    let mut resolver = resolver(5);
    let joke = resolver.resolve("tell me a joke");
    assert!(joke.starts_with("Why") || joke.starts_with("What"), "{joke}");

    let fact = resolver.resolve("tell me a fact");
    assert!(fact.starts_with("The first") || fact.starts_with("Python"), "{fact}");

    let quote = resolver.resolve("tell me a quote");
    assert!(quote.starts_with('"'), "{quote}");
}

#[test]
fn calculator_examples() {
    let cases: Vec<(&str, &str)> = vec![
        ("calculate 5 + 3 * 2", "The answer is 11"),
        ("Calculate 12 / 4", "The answer is 3"),
        ("calculate (1 + 2) * 3", "The answer is 9"),
        ("calculate 7 / 2", "The answer is 3.5"),
        ("calculate -4 + 1", "The answer is -3"),
        ("calculate", CALCULATE_PROMPT),
        ("calculate   ", CALCULATE_PROMPT),
        ("calculate 1 / 0", CALCULATE_FAILED),
        ("calculate 2 +", CALCULATE_FAILED),
        ("calculate 5.", CALCULATE_FAILED),
        ("calculate process.exit(1)", CALCULATE_FAILED),
        ("calculate alert('hi')", CALCULATE_FAILED),
    ];

    let mut resolver = resolver(1);
    for (input, expected) in cases {
        assert_eq!(resolver.resolve(input), expected, "input: {input}");
    }
}

#[test]
fn caller_responses_shadow_builtins_and_extend_the_catalogue() {
    let mut resolver = resolver(1);
    resolver
        .add_responses(vec![
            ("tell me a joke", ResponseValue::text("Knock knock.")),
            ("what is your favorite color", ResponseValue::text("Blue, obviously.")),
            ("shout", ResponseValue::computed(|message, _| message.to_uppercase())),
        ])
        .unwrap();

    assert_eq!(resolver.resolve("tell me a joke"), "Knock knock.");
    assert_eq!(resolver.resolve("what is your favourite colour"), "Blue, obviously.");
    assert_eq!(resolver.resolve("Shout"), "SHOUT");
    assert_eq!(resolver.resolve("hi"), "Hi there!👋 How can I help you?");
}

#[test]
fn near_misses_still_clear_the_floor() {
    // Greetings with typos stay above the confidence floor.
    assert!(similarity("god morning", "good morning") > crate::CONFIDENCE_FLOOR);
    assert!(similarity("tel me a joke", "tell me a joke") > crate::CONFIDENCE_FLOOR);
    assert_eq!(resolver(1).resolve("god morning"), "Good morning ☀️! Let’s make today amazing.");
}
