use crate::Context;
use chrono::NaiveDateTime;
use rand::Rng;
use rand::seq::SliceRandom;

/// Pick one of `items` uniformly using the context's generator.
pub fn pick<'a>(items: &[&'a str], ctx: &mut Context) -> &'a str {
    items.choose(ctx.rng()).copied().unwrap_or_default()
}

pub fn coin_flip(ctx: &mut Context) -> &'static str {
    if ctx.rng().gen_bool(0.5) { "heads" } else { "tails" }
}

pub fn dice_roll(ctx: &mut Context) -> u8 {
    ctx.rng().gen_range(1..=6)
}

/// `October 7, 2025`
pub fn long_date(now: NaiveDateTime) -> String {
    now.format("%B %-d, %Y").to_string()
}

/// `3:04:05 PM`
pub fn clock_time(now: NaiveDateTime) -> String {
    now.format("%-I:%M:%S %p").to_string()
}

/// Drop every case-insensitive occurrence of `calculate` and trim the rest.
pub fn strip_calculate(message: &str) -> String {
    regex!(r"(?i)calculate").replace_all(message, "").trim().to_string()
}
