//! Synthetic fine-tuning dataset generator for stress testing jsonl2csv.
//!
//! Usage: cargo run --features gen-dataset --bin gen_dataset -- [records] [output] [noise]
//! Example: cargo run --features gen-dataset --bin gen_dataset -- 100000 heavy_train.jsonl 0.05
//!
//! `noise` is the share of lines that are blank or broken on purpose.

use rand::Rng;
use rand::seq::SliceRandom;
use serde_json::{Value, json};
use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};

const ZALGO_CHARS: &[char] = &[
    '\u{0300}', '\u{0301}', '\u{0302}', '\u{0303}', '\u{0304}', '\u{0305}', '\u{0306}', '\u{0307}',
    '\u{0308}', '\u{0309}', '\u{030A}', '\u{030B}', '\u{030C}', '\u{030D}', '\u{030E}', '\u{030F}',
];

const EMOJIS: &[&str] = &["😀", "🤔", "🤯", "🤖", "🦄", "🔥", "❤️", "🏳️‍🌈", "👨‍👩‍👧‍👦", "🧑‍🚀"];

const SYSTEM_PROMPTS: &[&str] = &[
    "You are a helpful assistant.",
    "You are a terse assistant. Answer in one sentence.",
    "Ты полезный ассистент.",
    "あなたは親切なアシスタントです。",
    "Always answer with \"quotes\", commas, and\nnewlines.",
    "",
];

const QUESTIONS: &[&str] = &[
    "What is the capital of France?",
    "Explain ownership in Rust.",
    "Summarize this: a,b,c;d|e",
    "How do I escape \"quotes\" in CSV?",
    "Переведи на английский: привет",
    "東京の天気は？",
    "Write a haiku\nabout the sea",
    "   padded question   ",
];

const ANSWERS: &[&str] = &[
    "Paris.",
    "Every value has a single owner; borrowing lends access without moving it.",
    "Letters separated by punctuation.",
    "Double them: \"\" inside a quoted field.",
    "hello",
    "晴れです。",
    "Waves fold on the shore\nsalt wind carries gull voices\nthe tide forgets us",
    "",
];

const BROKEN_LINES: &[&str] = &[
    "not json at all",
    "{\"messages\": [",
    "{\"prompt\": \"unterminated",
    "[1, 2, 3]",
    "\"just a string\"",
    "{\"messages\": \"should be an array\"}",
    "{\"messages\": [{\"role\": \"user\", \"content\": 42}]}",
];

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(100_000);
    let output = args.get(2).map(|s| s.as_str()).unwrap_or("heavy_train.jsonl");
    let noise: f64 = args
        .get(3)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.0_f64)
        .clamp(0.0, 1.0);

    println!("🧪 Dataset Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Records: {}", count);
    println!("   Output:  {}", output);
    println!("   Noise:   {:.0}%", noise * 100.0);
    println!();

    let file = File::create(output)?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file);
    let mut rng = rand::thread_rng();

    let start = std::time::Instant::now();
    let mut bytes_written: usize = 0;
    let mut noisy: usize = 0;

    for i in 0..count {
        let line = if rng.gen_bool(noise) {
            noisy += 1;
            noise_line(&mut rng)
        } else {
            record(&mut rng).to_string()
        };

        bytes_written += line.len() + 1;
        writeln!(writer, "{}", line)?;

        if (i + 1) % 10_000 == 0 {
            let elapsed = start.elapsed().as_secs_f64();
            eprint!(
                "\r   Generated {}/{} ({:.1} MB, {:.0} rec/s)",
                i + 1,
                count,
                bytes_written as f64 / 1_000_000.0,
                (i + 1) as f64 / elapsed
            );
        }
    }

    writer.flush()?;

    let elapsed = start.elapsed();
    eprintln!();
    println!();
    println!("✅ Done!");
    println!("   Lines:   {} ({} noisy)", count, noisy);
    println!("   Size:    {:.2} MB", bytes_written as f64 / 1_000_000.0);
    println!("   Time:    {:.2}s", elapsed.as_secs_f64());

    Ok(())
}

fn record(rng: &mut impl Rng) -> Value {
    match rng.gen_range(0..10) {
        0..=5 => chat_record(rng),
        6 | 7 => flat_record(rng),
        8 => repeated_role_record(rng),
        _ => content_parts_record(rng),
    }
}

fn chat_record(rng: &mut impl Rng) -> Value {
    let mut messages = Vec::with_capacity(3);
    if rng.gen_bool(0.7) {
        messages.push(json!({"role": "system", "content": pick(rng, SYSTEM_PROMPTS)}));
    }
    let question = pick(rng, QUESTIONS);
    messages.push(json!({"role": "user", "content": spice(rng, question)}));
    if rng.gen_bool(0.95) {
        let answer = pick(rng, ANSWERS);
        messages.push(json!({"role": "assistant", "content": spice(rng, answer)}));
    }
    if rng.gen_bool(0.05) {
        // Unknown roles are ignored by the converter.
        messages.push(json!({"role": "tool", "content": "{\"result\": 42}"}));
    }
    json!({ "messages": messages })
}

fn flat_record(rng: &mut impl Rng) -> Value {
    let question = pick(rng, QUESTIONS);
    let mut record = json!({"prompt": spice(rng, question)});
    if rng.gen_bool(0.9) {
        let answer = pick(rng, ANSWERS);
        record["completion"] = json!(spice(rng, answer));
    }
    record
}

/// Multi-turn record: the last user and assistant messages are the ones kept.
fn repeated_role_record(rng: &mut impl Rng) -> Value {
    let turns = rng.gen_range(2..6);
    let mut messages = vec![json!({"role": "system", "content": pick(rng, SYSTEM_PROMPTS)})];
    for _ in 0..turns {
        messages.push(json!({"role": "user", "content": pick(rng, QUESTIONS)}));
        messages.push(json!({"role": "assistant", "content": pick(rng, ANSWERS)}));
    }
    json!({ "messages": messages })
}

fn content_parts_record(rng: &mut impl Rng) -> Value {
    let parts: Vec<Value> = (0..rng.gen_range(1..4))
        .map(|_| json!({"type": "text", "text": pick(rng, QUESTIONS)}))
        .collect();
    json!({
        "messages": [
            {"role": "user", "content": parts},
            {"role": "assistant", "content": pick(rng, ANSWERS)},
        ]
    })
}

fn noise_line(rng: &mut impl Rng) -> String {
    if rng.gen_bool(0.3) {
        return " ".repeat(rng.gen_range(0..4));
    }
    pick(rng, BROKEN_LINES).to_string()
}

fn pick<'a>(rng: &mut impl Rng, pool: &[&'a str]) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}

/// Occasionally decorates text with emojis, zalgo marks or a very long tail.
fn spice(rng: &mut impl Rng, text: &str) -> String {
    match rng.gen_range(0..20) {
        0 => {
            let emoji = pick(rng, EMOJIS);
            format!("{emoji} {text} {emoji}")
        }
        1 => text
            .chars()
            .flat_map(|c| {
                let mark = *ZALGO_CHARS.choose(rng).unwrap_or(&'\u{0300}');
                [c, mark]
            })
            .collect(),
        2 => format!("{text} {}", "lorem ipsum ".repeat(rng.gen_range(100..1000))),
        _ => text.to_string(),
    }
}
