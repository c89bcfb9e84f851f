use crate::config::Config;

/// Currency display preferences derived from the active [`Config`].
#[derive(Debug, Clone, PartialEq)]
pub struct CurrencyFormat {
    pub code: String,
    pub precision: usize,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            code: "EUR".into(),
            precision: 2,
        }
    }
}

impl CurrencyFormat {
    pub fn from_config(config: &Config) -> Self {
        Self {
            code: config.currency.to_uppercase(),
            precision: config.currency_precision as usize,
        }
    }

    /// Symbol for well-known codes, otherwise the ISO code itself.
    pub fn symbol(&self) -> &str {
        match self.code.as_str() {
            "EUR" => "€",
            "USD" => "$",
            "GBP" => "£",
            "BRL" => "R$",
            other => other,
        }
    }

    pub fn format(&self, amount: f64) -> String {
        // Avoid printing "-0.00" for values that round to zero.
        let rounded = format!("{:.prec$}", amount, prec = self.precision);
        let cleaned = if rounded.starts_with('-') && rounded[1..].chars().all(|c| c == '0' || c == '.')
        {
            rounded[1..].to_string()
        } else {
            rounded
        };
        format!("{cleaned} {}", self.symbol())
    }
}
