use crate::domain::reservoir::ScenarioPercentages;
use serde::{Deserialize, Serialize};

/// 预设情景（what-if）
///
/// 存储位置：配置快照中 key='scenario_profile/{profile_id}'，value 为 JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioProfile {
    /// 情景 ID（用于选择/引用）
    pub profile_id: String,

    /// 显示名称
    pub title: String,

    /// 说明（可选）
    #[serde(default)]
    pub description: Option<String>,

    /// 百分比调整（缺省项按 0 处理）
    #[serde(default)]
    pub adjustments: ScenarioAdjustments,
}

/// 四项情景调整百分比，均可缺省
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ScenarioAdjustments {
    /// 河道来水
    #[serde(default)]
    pub river_pct: Option<f64>,

    /// 上游下泄
    #[serde(default)]
    pub upstream_pct: Option<f64>,

    /// 需水
    #[serde(default)]
    pub demand_pct: Option<f64>,

    /// 刚性承诺
    #[serde(default)]
    pub commitments_pct: Option<f64>,
}

impl ScenarioProfile {
    /// 以 base 为底，覆盖本情景给出的项
    pub fn overlay(&self, base: ScenarioPercentages) -> ScenarioPercentages {
        let a = &self.adjustments;
        ScenarioPercentages {
            river_pct: a.river_pct.unwrap_or(base.river_pct),
            upstream_pct: a.upstream_pct.unwrap_or(base.upstream_pct),
            demand_pct: a.demand_pct.unwrap_or(base.demand_pct),
            commitments_pct: a.commitments_pct.unwrap_or(base.commitments_pct),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_parse_with_missing_fields() {
        let raw = r#"{"profile_id":"dry","title":"枯水","adjustments":{"river_pct":-30}}"#;
        let profile: ScenarioProfile = serde_json::from_str(raw).unwrap();
        assert_eq!(profile.description, None);
        assert_eq!(profile.adjustments.river_pct, Some(-30.0));
        assert_eq!(profile.adjustments.demand_pct, None);
    }

    #[test]
    fn test_overlay_keeps_unset_values() {
        let profile = ScenarioProfile {
            profile_id: "wet".to_string(),
            title: "丰水".to_string(),
            description: None,
            adjustments: ScenarioAdjustments {
                river_pct: Some(20.0),
                upstream_pct: Some(10.0),
                ..Default::default()
            },
        };
        let base = ScenarioPercentages {
            demand_pct: 5.0,
            ..Default::default()
        };
        let merged = profile.overlay(base);
        assert_eq!(merged.river_pct, 20.0);
        assert_eq!(merged.upstream_pct, 10.0);
        assert_eq!(merged.demand_pct, 5.0);
        assert_eq!(merged.commitments_pct, 0.0);
    }
}
