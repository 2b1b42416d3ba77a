// Built-in exercise catalog and display-name localization.
use once_cell::sync::Lazy;
use phf::phf_map;
use serde::{Deserialize, Serialize};

use crate::model::{Exercise, ExerciseKind};

/// Language preference persisted in the settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "system")]
    System,
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh-Hans")]
    ZhHans,
}

/// A concrete locale after resolving the `System` preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locale {
    En,
    ZhHans,
}

impl Language {
    /// Resolve to a concrete locale. `system_tag` is the host locale string
    /// (e.g. `zh-Hans-CN`, `en_US`), passed in so resolution stays
    /// deterministic in tests.
    pub fn resolve(self, system_tag: &str) -> Locale {
        match self {
            Language::En => Locale::En,
            Language::ZhHans => Locale::ZhHans,
            Language::System => {
                if system_tag.starts_with("zh") {
                    Locale::ZhHans
                } else {
                    Locale::En
                }
            }
        }
    }
}

/// Catalog entry for a built-in exercise.
pub struct BuiltinExercise {
    pub name_en: &'static str,
    pub name_zh: &'static str,
    pub notes_en: &'static str,
    pub notes_zh: &'static str,
    pub muscle_group: &'static str,
    pub kind: ExerciseKind,
}

/// Built-in exercises keyed by canonical name. The canonical name is what
/// gets stored on the entity; display names are looked up here.
pub static BUILTINS: phf::Map<&'static str, BuiltinExercise> = phf_map! {
    "Squat" => BuiltinExercise {
        name_en: "Squat",
        name_zh: "深蹲",
        notes_en: "Keep the bar over mid-foot; brace before descending.",
        notes_zh: "杠铃保持在脚中心上方，下蹲前收紧核心。",
        muscle_group: "legs",
        kind: ExerciseKind::WeightReps,
    },
    "Bench Press" => BuiltinExercise {
        name_en: "Bench Press",
        name_zh: "卧推",
        notes_en: "Shoulder blades pinned, feet planted.",
        notes_zh: "肩胛骨收紧，双脚踩实。",
        muscle_group: "chest",
        kind: ExerciseKind::WeightReps,
    },
    "Deadlift" => BuiltinExercise {
        name_en: "Deadlift",
        name_zh: "硬拉",
        notes_en: "Neutral spine; push the floor away.",
        notes_zh: "保持脊柱中立，用腿部发力蹬地。",
        muscle_group: "back",
        kind: ExerciseKind::WeightReps,
    },
    "Overhead Press" => BuiltinExercise {
        name_en: "Overhead Press",
        name_zh: "站姿推举",
        notes_en: "Glutes tight, ribs down.",
        notes_zh: "臀部收紧，肋骨下沉。",
        muscle_group: "shoulders",
        kind: ExerciseKind::WeightReps,
    },
    "Barbell Row" => BuiltinExercise {
        name_en: "Barbell Row",
        name_zh: "杠铃划船",
        notes_en: "Pull to the lower chest without jerking.",
        notes_zh: "拉向下胸，避免借力甩动。",
        muscle_group: "back",
        kind: ExerciseKind::WeightReps,
    },
    "Biceps Curl" => BuiltinExercise {
        name_en: "Biceps Curl",
        name_zh: "二头弯举",
        notes_en: "Elbows stay at the sides.",
        notes_zh: "手肘固定在身体两侧。",
        muscle_group: "arms",
        kind: ExerciseKind::WeightReps,
    },
    "Lat Pulldown" => BuiltinExercise {
        name_en: "Lat Pulldown",
        name_zh: "高位下拉",
        notes_en: "Lead with the elbows, chest up.",
        notes_zh: "以手肘发力下拉，挺胸。",
        muscle_group: "back",
        kind: ExerciseKind::WeightReps,
    },
    "Pull-Up" => BuiltinExercise {
        name_en: "Pull-Up",
        name_zh: "引体向上",
        notes_en: "Full hang to chin over the bar.",
        notes_zh: "从完全悬垂拉至下巴过杠。",
        muscle_group: "back",
        kind: ExerciseKind::RepsOnly,
    },
    "Push-Up" => BuiltinExercise {
        name_en: "Push-Up",
        name_zh: "俯卧撑",
        notes_en: "Body in one line from head to heels.",
        notes_zh: "从头到脚保持一条直线。",
        muscle_group: "chest",
        kind: ExerciseKind::RepsOnly,
    },
    "Plank" => BuiltinExercise {
        name_en: "Plank",
        name_zh: "平板支撑",
        notes_en: "Squeeze glutes; do not let the hips sag.",
        notes_zh: "收紧臀部，髋部不要下塌。",
        muscle_group: "core",
        kind: ExerciseKind::TimeOnly,
    },
    "Leg Press" => BuiltinExercise {
        name_en: "Leg Press",
        name_zh: "腿举",
        notes_en: "Lower under control, knees tracking the toes.",
        notes_zh: "控制下放，膝盖与脚尖方向一致。",
        muscle_group: "legs",
        kind: ExerciseKind::WeightReps,
    },
    "Lunge" => BuiltinExercise {
        name_en: "Lunge",
        name_zh: "弓步蹲",
        notes_en: "Long step, torso upright.",
        notes_zh: "跨步要大，上身保持直立。",
        muscle_group: "legs",
        kind: ExerciseKind::WeightReps,
    },
};

/// Canonical names of the built-in exercises, sorted for stable seeding.
/// phf iteration order is arbitrary, so the sorted list is computed once.
pub static BUILTIN_NAMES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    let mut names: Vec<&'static str> = BUILTINS.keys().copied().collect();
    names.sort_unstable();
    names
});

/// Lookup a built-in catalog entry by canonical name.
pub fn builtin(name: &str) -> Option<&'static BuiltinExercise> {
    BUILTINS.get(name)
}

/// Localized display name; user-created exercises keep their raw name.
pub fn display_name(exercise: &Exercise, locale: Locale) -> String {
    match (builtin(&exercise.name), locale) {
        (Some(b), Locale::En) => b.name_en.to_string(),
        (Some(b), Locale::ZhHans) => b.name_zh.to_string(),
        (None, _) => exercise.name.clone(),
    }
}

/// Effective display notes: user notes win, built-in notes fill the gap,
/// user-created exercises fall back to their raw notes.
pub fn display_notes(exercise: &Exercise, locale: Locale) -> String {
    if !exercise.notes.is_empty() {
        return exercise.notes.clone();
    }
    match (builtin(&exercise.name), locale) {
        (Some(b), Locale::En) => b.notes_en.to_string(),
        (Some(b), Locale::ZhHans) => b.notes_zh.to_string(),
        (None, _) => String::new(),
    }
}

/// Localized label for a muscle-group tag. Unknown tags come back verbatim.
pub fn muscle_group_label(tag: &str, locale: Locale) -> &str {
    match (tag, locale) {
        ("chest", Locale::En) => "Chest",
        ("chest", Locale::ZhHans) => "胸部",
        ("back", Locale::En) => "Back",
        ("back", Locale::ZhHans) => "背部",
        ("legs", Locale::En) => "Legs",
        ("legs", Locale::ZhHans) => "腿部",
        ("shoulders", Locale::En) => "Shoulders",
        ("shoulders", Locale::ZhHans) => "肩部",
        ("arms", Locale::En) => "Arms",
        ("arms", Locale::ZhHans) => "手臂",
        ("core", Locale::En) => "Core",
        ("core", Locale::ZhHans) => "核心",
        _ => tag,
    }
}

/// Localized label for an exercise kind.
pub fn kind_label(kind: ExerciseKind, locale: Locale) -> &'static str {
    match (kind, locale) {
        (ExerciseKind::WeightReps, Locale::En) => "Weight & Reps",
        (ExerciseKind::WeightReps, Locale::ZhHans) => "重量×次数",
        (ExerciseKind::RepsOnly, Locale::En) => "Reps Only",
        (ExerciseKind::RepsOnly, Locale::ZhHans) => "仅次数",
        (ExerciseKind::TimeOnly, Locale::En) => "Time Only",
        (ExerciseKind::TimeOnly, Locale::ZhHans) => "仅时间",
    }
}
