// Scripted chat replies and keyword mood classification.
//
// Both tables are matched on the lower-cased text by plain substring checks,
// first entry wins. The responder looks only at the question; the classifier
// looks at question and answer together, so the two can disagree.

use super::mood::Mood;

pub struct ReplyRule {
    pub keywords: &'static [&'static str],
    pub answer: &'static str,
}

pub const REPLY_RULES: &[ReplyRule] = &[
    ReplyRule {
        keywords: &["colab", "gpu", "t4"],
        answer: "ColabはGPUが使えて便利だけど、VRAM制約と実行時間制限が先に来がち。まずは小さく動く最小構成→計測→削る、が安定だよ。",
    },
    ReplyRule {
        keywords: &["kaggle"],
        answer: "Kaggleは『再現性のある環境＋公開ノート』が強み。まずはE2Eで1回提出できる形にして、あとから特徴量を足すのが勝ち筋。",
    },
    ReplyRule {
        keywords: &["ar", "blender"],
        answer: "ARは“置けた感”が出ると一気に楽しい。BlenderはIdle1本だけ付けるのが最短。まず疑似ARで体験を作って、後で本物ARに寄せよう。",
    },
];

pub const FALLBACK_ANSWER: &str =
    "なるほど。要点を1つに絞ると『まず動く形を作ってから賢くする』のが一番速いよ。もう一段具体化する？";

pub struct MoodRule {
    pub mood: Mood,
    pub keywords: &'static [&'static str],
}

// Priority order: earlier rules win.
pub const MOOD_RULES: &[MoodRule] = &[
    MoodRule {
        mood: Mood::Angry,
        keywords: &["怒", "ムカつく", "むかつく", "イライラ", "最悪", "angry", "hate"],
    },
    MoodRule {
        mood: Mood::Sad,
        keywords: &["悲しい", "かなしい", "つらい", "辛い", "無理", "疲れ", "sad", "tired"],
    },
    MoodRule {
        mood: Mood::Surprised,
        keywords: &["びっくり", "驚", "まじ", "マジ", "本当", "えっ", "wow", "really"],
    },
    MoodRule {
        mood: Mood::Happy,
        keywords: &[
            "ありがとう",
            "嬉しい",
            "うれしい",
            "楽しい",
            "最高",
            "thanks",
            "thank you",
            "happy",
        ],
    },
];

/// Canned answer for a question.
pub fn dummy_answer(question: &str) -> &'static str {
    let s = question.to_lowercase();
    REPLY_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| s.contains(k)))
        .map(|rule| rule.answer)
        .unwrap_or(FALLBACK_ANSWER)
}

/// Mood tag for a piece of text; neutral when nothing matches.
pub fn classify_mood(text: &str) -> Mood {
    let s = text.to_lowercase();
    MOOD_RULES
        .iter()
        .find(|rule| rule.keywords.iter().any(|k| s.contains(k)))
        .map(|rule| rule.mood)
        .unwrap_or(Mood::Neutral)
}

#[derive(Clone, Debug, PartialEq)]
pub struct Reply {
    pub answer: &'static str,
    pub mood: Mood,
}

pub fn reply(question: &str) -> Reply {
    let answer = dummy_answer(question);
    let mut combined = String::with_capacity(question.len() + answer.len());
    combined.push_str(question);
    combined.push_str(answer);
    Reply {
        answer,
        mood: classify_mood(&combined),
    }
}
