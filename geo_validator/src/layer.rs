use std::fmt;

/// One of the three boundary layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Layer {
    City,
    MicroMarkets,
    Localities,
}

impl Layer {
    /// Load/check order.
    pub const ALL: [Layer; 3] = [Layer::City, Layer::MicroMarkets, Layer::Localities];

    pub const fn file_name(self) -> &'static str {
        match self {
            Layer::City => "mumbai_city.geojson",
            Layer::MicroMarkets => "mumbai_micro_markets.geojson",
            Layer::Localities => "mumbai_localities.geojson",
        }
    }

    pub const fn required_props(self) -> &'static [&'static str] {
        match self {
            Layer::City => &["CityID", "CityName"],
            Layer::MicroMarkets => &["MicroMarketID", "CityID", "MicroMarketName"],
            Layer::Localities => &["LocalityID", "MicroMarketID", "CityID", "LocalityName"],
        }
    }

    /// The property that must be unique within the layer.
    pub const fn id_prop(self) -> &'static str {
        match self {
            Layer::City => "CityID",
            Layer::MicroMarkets => "MicroMarketID",
            Layer::Localities => "LocalityID",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}
