//! LevelEngine: スマイルポイント合計からレベルを求める純粋な計算

use serde::Serialize;

use super::value_object::Level;

/// 閾値の個数（レベルは 10 段階）
pub const THRESHOLD_COUNT: usize = 9;

/// 会議ごとに 1 度だけ固定されるレベル閾値
///
/// `threshold[i] = baseline × 2^i`（i = 0..8）の等比数列です。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LevelThresholds([u64; THRESHOLD_COUNT]);

impl LevelThresholds {
    /// 閾値が固定された瞬間のスマイルポイント合計から閾値を計算する
    pub fn from_baseline(baseline: u64) -> Self {
        let mut thresholds = [0; THRESHOLD_COUNT];
        for (i, threshold) in thresholds.iter_mut().enumerate() {
            *threshold = baseline.saturating_mul(1 << i);
        }
        Self(thresholds)
    }

    pub fn values(&self) -> &[u64; THRESHOLD_COUNT] {
        &self.0
    }

    /// `total >= threshold[i]` を満たす最大の i に対してレベル i + 2、
    /// どれも満たさなければレベル 1
    pub fn level_for(&self, total_smile_point: u64) -> Level {
        self.0
            .iter()
            .rposition(|threshold| total_smile_point >= *threshold)
            .map(|i| Level::clamped(i as u8 + 2))
            .unwrap_or(Level::MIN)
    }
}

/// レベル計算
pub struct LevelEngine;

impl LevelEngine {
    /// 現在のレベルを計算する（閾値が未設定ならレベル 1 に固定）
    pub fn compute_level(total_smile_point: u64, thresholds: Option<&LevelThresholds>) -> Level {
        match thresholds {
            Some(thresholds) => thresholds.level_for(total_smile_point),
            None => Level::MIN,
        }
    }

    /// レベルが変化した場合は報酬画像を生成する
    pub fn requires_reward_image(previous: Level, current: Level) -> bool {
        previous != current
    }
}
