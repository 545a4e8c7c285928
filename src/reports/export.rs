use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

use super::Scenario;

#[derive(Serialize)]
struct CsvRow<'a> {
    cenario: &'a str,
    produto: &'static str,
    tipo: &'static str,
    taxa: String,
    prazo: u32,
    valor_investido: String,
    valor_bruto: String,
    imposto_ir: String,
    iof: String,
    custodia: String,
    valor_liquido: String,
    rentabilidade: String,
    rentabilidade_anual: String,
}

fn two_places(value: Decimal) -> String {
    format!("{:.2}", value.round_dp(2))
}

impl<'a> From<&'a Scenario> for CsvRow<'a> {
    fn from(s: &'a Scenario) -> Self {
        let r = &s.result;
        CsvRow {
            cenario: &s.label,
            produto: r.kind.as_str(),
            tipo: r.rate.kind_label(),
            taxa: two_places(r.rate.quoted_pct()),
            prazo: r.term_days,
            valor_investido: two_places(r.principal),
            valor_bruto: two_places(r.gross_value),
            imposto_ir: two_places(r.income_tax),
            iof: two_places(r.iof),
            custodia: two_places(r.custody_fee),
            valor_liquido: two_places(r.net_value),
            rentabilidade: two_places(r.net_return_pct),
            rentabilidade_anual: two_places(r.annualized_net_return_pct),
        }
    }
}

/// Write one CSV row per scenario (header included)
pub fn write_csv<W: Write>(writer: W, scenarios: &[&Scenario]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for scenario in scenarios {
        csv_writer
            .serialize(CsvRow::from(*scenario))
            .context("Failed to write CSV row")?;
    }
    csv_writer.flush().context("Failed to flush CSV output")?;
    Ok(())
}

pub fn export_csv(path: &Path, scenarios: &[&Scenario]) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create CSV file {}", path.display()))?;
    write_csv(file, scenarios)?;
    info!("Exported {} scenario(s) to {}", scenarios.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{InstrumentKind, InvestmentInput, RateSpec};
    use rust_decimal_macros::dec;

    #[test]
    fn test_csv_layout() {
        let input = InvestmentInput::new(
            dec!(1000),
            RateSpec::Prefixed {
                annual_pct: dec!(10),
            },
            365,
            InstrumentKind::Cdb,
        );
        let scenario = Scenario::simulate("Investimento", input).unwrap();

        let mut buf = Vec::new();
        write_csv(&mut buf, &[&scenario]).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next().unwrap(),
            "cenario,produto,tipo,taxa,prazo,valor_investido,valor_bruto,imposto_ir,iof,custodia,valor_liquido,rentabilidade,rentabilidade_anual"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Investimento,CDB,Pré,10.00,365,1000.00,1100.00,17.50,0.00,0.00,1082.50,8.25,8.25"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let input = InvestmentInput::new(
            dec!(5000),
            RateSpec::PercentOfCdi {
                pct_of_cdi: dec!(95),
                cdi_annual_pct: dec!(13.75),
            },
            720,
            InstrumentKind::Lci,
        );
        let scenario = Scenario::simulate("LCI", input).unwrap();
        export_csv(&path, &[&scenario, &scenario]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
        assert!(content.contains("LCI,LCI,Pós,95.00,720,5000.00"));
    }
}
