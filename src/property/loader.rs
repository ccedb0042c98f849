//! Load investment scenarios from CSV

use std::path::Path;

use thiserror::Error;

use super::PropertyInvestment;

/// Errors from scenario loading
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read scenario file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scenario row: {0}")]
    Csv(#[from] csv::Error),

    #[error("scenario {scenario_id}: {reason}")]
    Invalid { scenario_id: u32, reason: String },
}

/// Raw CSV row matching the scenario file columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "ScenarioID")]
    scenario_id: u32,
    #[serde(rename = "PurchasePrice")]
    purchase_price: f64,
    #[serde(rename = "AdditionalCosts")]
    additional_costs: f64,
    #[serde(rename = "BuildingValue")]
    building_value: f64,
    #[serde(rename = "Debt")]
    debt: f64,
    #[serde(rename = "AnnualRatePct")]
    annual_rate_pct: f64,
    #[serde(rename = "MonthlyPayment")]
    monthly_payment: f64,
    #[serde(rename = "MonthlyRent")]
    monthly_rent: f64,
    #[serde(rename = "AnnualExpenses")]
    annual_expenses: f64,
    #[serde(rename = "TaxRatePct")]
    tax_rate_pct: f64,
    #[serde(rename = "ApplyTax")]
    apply_tax: String,
    #[serde(rename = "StartMonth")]
    start_month: u32,
    #[serde(rename = "StartYear")]
    start_year: i32,
}

impl CsvRow {
    fn into_property(self) -> Result<PropertyInvestment, LoadError> {
        let apply_tax = match self.apply_tax.as_str() {
            "Y" | "y" | "1" | "true" => true,
            "N" | "n" | "0" | "false" => false,
            other => {
                return Err(LoadError::Invalid {
                    scenario_id: self.scenario_id,
                    reason: format!("unknown ApplyTax value: {}", other),
                })
            }
        };

        if self.start_month > 11 {
            return Err(LoadError::Invalid {
                scenario_id: self.scenario_id,
                reason: format!("StartMonth must be 0-11, got {}", self.start_month),
            });
        }

        Ok(PropertyInvestment {
            scenario_id: self.scenario_id,
            purchase_price: self.purchase_price,
            additional_costs: self.additional_costs,
            building_value: self.building_value,
            debt: self.debt,
            annual_rate_pct: self.annual_rate_pct,
            monthly_payment: self.monthly_payment,
            monthly_rent: self.monthly_rent,
            annual_expenses: self.annual_expenses,
            tax_rate_pct: self.tax_rate_pct,
            apply_tax,
            start_month: self.start_month,
            start_year: self.start_year,
        })
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<PropertyInvestment>, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut scenarios = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.into_property()?);
    }

    Ok(scenarios)
}

/// Load scenarios from any reader (e.g. a string buffer)
pub fn load_scenarios_from_reader<R: std::io::Read>(
    reader: R,
) -> Result<Vec<PropertyInvestment>, LoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.into_property()?);
    }

    Ok(scenarios)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
ScenarioID,PurchasePrice,AdditionalCosts,BuildingValue,Debt,AnnualRatePct,MonthlyPayment,MonthlyRent,AnnualExpenses,TaxRatePct,ApplyTax,StartMonth,StartYear
1,300000,30000,240000,280000,4.0,1500,1200,1200,42,Y,0,2026
2,150000,12000,120000,100000,3.5,800,700,900,35,N,6,2027
";

    #[test]
    fn test_load_from_reader() {
        let scenarios = load_scenarios_from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[0].scenario_id, 1);
        assert!(scenarios[0].apply_tax);
        assert_eq!(scenarios[1].start_month, 6);
        assert!(!scenarios[1].apply_tax);
    }

    #[test]
    fn test_invalid_apply_tax_rejected() {
        let bad = SAMPLE.replace(",Y,", ",maybe,");
        let result = load_scenarios_from_reader(bad.as_bytes());

        match result {
            Err(LoadError::Invalid { scenario_id, .. }) => assert_eq!(scenario_id, 1),
            other => panic!("expected Invalid error, got {:?}", other.map(|v| v.len())),
        }
    }

    #[test]
    fn test_out_of_range_start_month_rejected() {
        let bad = SAMPLE.replace(",42,Y,0,", ",42,Y,12,");
        assert!(load_scenarios_from_reader(bad.as_bytes()).is_err());
    }
}
