//! 画像生成プロンプト

use crate::domain::{AnimalType, Level};

/// レベルごとの成長の様子（レベル 1 から順に 10 段階）
const GROWTH_DESCRIPTIONS: [&str; 10] = [
    "A small, tired animal, looking peaceful but weak, low energy,",
    "A young animal, slightly playful, starting to gain energy, healthy,",
    "A growing animal, happy and playful, starting to look confident,",
    "A medium-sized animal, cheerful and active, full of vitality,",
    "A young adult animal, energetic and happy, strong and confident,",
    "A well-grown animal, full of energy, playful and intelligent,",
    "A mature animal, very active, visibly healthy and muscular,",
    "A highly energetic animal, at peak vitality, very happy and alert,",
    "An adult animal, vibrant and radiant, full of life,",
    "A majestic adult animal, the epitome of health and happiness,",
];

/// レベルと動物の種類から画像生成のプロンプトを組み立てる
pub fn build_prompt(level: Level, animal_type: &AnimalType) -> String {
    let level = Level::clamped(level.value()).value();
    let base = format!(
        "high resolution, a single {}, no other animals, no duplicates, no extra figures, \
         no humans, neutral plain background, focus on the animal, natural lighting",
        animal_type
    );
    let description = GROWTH_DESCRIPTIONS[usize::from(level - 1)];

    format!(
        "{} {} Growth level is {} out of 10, Energy level is {} out of 10.",
        base, description, level, level
    )
}
