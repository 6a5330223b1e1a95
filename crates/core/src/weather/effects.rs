//! Flavor text for conditions

use crate::core_types::condition::WeatherCondition;

/// Maps a condition to the effects text shown to players
pub trait EffectsTable {
    /// Effects text for `condition`
    fn effects(&self, condition: WeatherCondition) -> String;
}

/// Built-in effects text
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEffects;

impl EffectsTable for DefaultEffects {
    fn effects(&self, condition: WeatherCondition) -> String {
        let text = match condition {
            WeatherCondition::ClearSkies => "No weather penalties. Visibility is excellent.",
            WeatherCondition::LightClouds => "No weather penalties. Sunlight comes and goes.",
            WeatherCondition::HeavyClouds => {
                "Dim light. Ranged attacks at long range have disadvantage."
            }
            WeatherCondition::Rain => {
                "Lightly obscured. Disadvantage on Perception checks that rely on hearing. Open flames may be extinguished."
            }
            WeatherCondition::HeavyRain => {
                "Heavily obscured beyond 60 ft. Disadvantage on Perception checks. Travel pace is slowed."
            }
            WeatherCondition::Snow => {
                "Lightly obscured. Ground becomes difficult terrain after several hours."
            }
            WeatherCondition::Blizzard => {
                "Heavily obscured. Difficult terrain. Exposed creatures risk exhaustion from cold."
            }
            WeatherCondition::Thunderstorm => {
                "Heavily obscured. Lightning strikes are possible. Disadvantage on hearing-based Perception checks."
            }
            WeatherCondition::Fog => "Lightly obscured beyond 30 ft.",
            WeatherCondition::HeavyFog => "Heavily obscured beyond 10 ft.",
            WeatherCondition::ScorchingHeat => {
                "Creatures without water risk exhaustion each hour. Heavy armor is punishing."
            }
            WeatherCondition::FreezingCold => {
                "Creatures without cold-weather gear risk exhaustion each hour."
            }
            WeatherCondition::ColdWinds => {
                "Ranged weapon attacks have disadvantage. Flying is difficult. Exposed creatures feel the chill."
            }
            WeatherCondition::HighHumidityHaze => {
                "Lightly obscured at distance. Strenuous activity is tiring."
            }
        };
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_condition_has_text() {
        for condition in WeatherCondition::ALL {
            assert!(!DefaultEffects.effects(condition).is_empty(), "{condition}");
        }
    }
}
