//! Weather icon resolution
//!
//! Icons travel as symbolic names. The wearable maps a name to one of its
//! bundled icons; unknown names fall back to the default icon.

use sunshine_protocol::DEFAULT_ICON;

/// A drawable icon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Icon {
    pub name: &'static str,
    pub width: u16,
    pub height: u16,
}

/// Maps symbolic icon names to icons
pub trait IconSet {
    /// Look up an icon by name
    fn resolve(&self, name: &str) -> Option<Icon>;

    /// Icon shown when nothing else resolves
    fn default_icon(&self) -> Icon;

    /// Look up an icon, falling back to the default
    fn resolve_or_default(&self, name: &str) -> Icon {
        self.resolve(name).unwrap_or_else(|| self.default_icon())
    }
}

/// Side length of the bundled small weather art
pub const SMALL_ART_SIZE: u16 = 48;

const fn small(name: &'static str) -> Icon {
    Icon {
        name,
        width: SMALL_ART_SIZE,
        height: SMALL_ART_SIZE,
    }
}

/// The icons bundled with the face
const BUNDLED: [Icon; 9] = [
    small(DEFAULT_ICON),
    small("ic_clear"),
    small("ic_cloudy"),
    small("ic_fog"),
    small("ic_light_clouds"),
    small("ic_light_rain"),
    small("ic_rain"),
    small("ic_snow"),
    small("ic_storm"),
];

/// The bundled weather icon set
#[derive(Debug, Clone, Copy, Default)]
pub struct WeatherIcons;

impl IconSet for WeatherIcons {
    fn resolve(&self, name: &str) -> Option<Icon> {
        BUNDLED.iter().find(|icon| icon.name == name).copied()
    }

    fn default_icon(&self) -> Icon {
        BUNDLED[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_icon() {
        let icon = WeatherIcons.resolve("ic_light_rain").unwrap();
        assert_eq!(icon.name, "ic_light_rain");
        assert_eq!(icon.width, SMALL_ART_SIZE);
    }

    #[test]
    fn test_unknown_icon_falls_back() {
        assert_eq!(WeatherIcons.resolve("ic_tornado"), None);
        assert_eq!(WeatherIcons.resolve_or_default("ic_tornado").name, "ic_logo");
    }
}
