#![forbid(unsafe_code)]

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Slider {
    Temperature,
    Salinity,
    Ph,
    Oxygen,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SliderSpec {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl Slider {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Salinity => "salinity",
            Self::Ph => "ph",
            Self::Oxygen => "oxygen",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "temperature" => Some(Self::Temperature),
            "salinity" => Some(Self::Salinity),
            "ph" => Some(Self::Ph),
            "oxygen" => Some(Self::Oxygen),
            _ => None,
        }
    }

    pub fn spec(self) -> SliderSpec {
        match self {
            Self::Temperature => SliderSpec {
                min: -5.0,
                max: 35.0,
                step: 1.0,
                default: 15.0,
            },
            Self::Salinity => SliderSpec {
                min: 0.0,
                max: 45.0,
                step: 1.0,
                default: 35.0,
            },
            Self::Ph => SliderSpec {
                min: 6.0,
                max: 9.0,
                step: 0.1,
                default: 8.1,
            },
            Self::Oxygen => SliderSpec {
                min: 0.0,
                max: 15.0,
                step: 0.5,
                default: 7.5,
            },
        }
    }

    /// Clamps into the declared range. Non-finite input falls back to the default.
    pub fn clamp(self, value: f64) -> f64 {
        let spec = self.spec();
        if !value.is_finite() {
            return spec.default;
        }
        value.clamp(spec.min, spec.max)
    }
}

/// The four simulation inputs. Values are always within their declared ranges.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Sliders {
    temperature: f64,
    salinity: f64,
    ph: f64,
    oxygen: f64,
}

impl Default for Sliders {
    fn default() -> Self {
        Self {
            temperature: Slider::Temperature.spec().default,
            salinity: Slider::Salinity.spec().default,
            ph: Slider::Ph.spec().default,
            oxygen: Slider::Oxygen.spec().default,
        }
    }
}

impl Sliders {
    pub fn new(temperature: f64, salinity: f64, ph: f64, oxygen: f64) -> Self {
        let mut sliders = Self::default();
        sliders.set(Slider::Temperature, temperature);
        sliders.set(Slider::Salinity, salinity);
        sliders.set(Slider::Ph, ph);
        sliders.set(Slider::Oxygen, oxygen);
        sliders
    }

    pub fn get(&self, slider: Slider) -> f64 {
        match slider {
            Slider::Temperature => self.temperature,
            Slider::Salinity => self.salinity,
            Slider::Ph => self.ph,
            Slider::Oxygen => self.oxygen,
        }
    }

    /// Stores the clamped value and returns what was stored.
    pub fn set(&mut self, slider: Slider, value: f64) -> f64 {
        let clamped = slider.clamp(value);
        let slot = match slider {
            Slider::Temperature => &mut self.temperature,
            Slider::Salinity => &mut self.salinity,
            Slider::Ph => &mut self.ph,
            Slider::Oxygen => &mut self.oxygen,
        };
        *slot = clamped;
        clamped
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn salinity(&self) -> f64 {
        self.salinity
    }

    pub fn ph(&self) -> f64 {
        self.ph
    }

    pub fn oxygen(&self) -> f64 {
        self.oxygen
    }
}
