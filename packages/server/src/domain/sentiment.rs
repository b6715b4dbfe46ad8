//! 語彙ベースの感情スコア
//!
//! AFINN 形式（-5..=5）の小さな辞書でメッセージごとのスコアを合計する。
//! 直前の語が否定語ならその語のスコアを反転する。

/// チャットメッセージ 1 件のスコア（辞書に載っている語の合計）
pub fn score(text: &str) -> i32 {
    let mut total = 0;
    let mut negate = false;
    for token in text
        .split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .filter(|t| !t.is_empty())
    {
        let token = token.to_lowercase();
        if is_negation(&token) {
            negate = true;
            continue;
        }
        let value = lexicon(&token);
        total += if negate { -value } else { value };
        negate = false;
    }
    total
}

/// 直近メッセージのスコア平均。空なら 0
pub fn average<'a>(texts: impl IntoIterator<Item = &'a str>) -> f64 {
    let (sum, count) = texts
        .into_iter()
        .filter(|t| !t.is_empty())
        .fold((0i64, 0u32), |(sum, count), t| {
            (sum + i64::from(score(t)), count + 1)
        });
    if count == 0 {
        0.0
    } else {
        sum as f64 / f64::from(count)
    }
}

fn is_negation(token: &str) -> bool {
    matches!(
        token,
        "not" | "no" | "never" | "don't" | "dont" | "isn't" | "isnt" | "can't" | "cant"
            | "won't" | "wont" | "doesn't" | "doesnt"
    )
}

fn lexicon(token: &str) -> i32 {
    match token {
        "amazing" | "awesome" | "outstanding" | "superb" | "breathtaking" | "thrilled" => 4,
        "love" | "loved" | "loving" | "excellent" | "fantastic" | "wonderful" | "perfect"
        | "incredible" | "brilliant" | "win" | "winning" | "hype" | "pog" | "poggers" => 3,
        "good" | "great" | "nice" | "cool" | "fun" | "funny" | "happy" | "glad" | "enjoy"
        | "enjoying" | "beautiful" | "best" | "wow" | "yay" | "congrats" | "thanks"
        | "thank" | "welcome" | "lol" | "lmao" | "gg" | "hilarious" | "excited" => 2,
        "like" | "ok" | "okay" | "yes" | "interesting" | "sure" | "agree" | "cute"
        | "hello" | "hi" | "hey" | "support" => 1,
        "meh" | "confused" | "tired" | "boring" | "bored" | "slow" | "weird"
        | "lag" | "laggy" => -1,
        "bad" | "sad" | "sucks" | "annoying" | "wrong" | "ugly" | "lose" | "lost"
        | "losing" | "fail" | "failed" | "angry" | "mad" | "cringe" | "rip" => -2,
        "hate" | "hated" | "awful" | "terrible" | "horrible" | "worst" | "stupid"
        | "trash" | "garbage" | "disgusting" => -3,
        "pathetic" | "toxic" => -4,
        _ => 0,
    }
}
