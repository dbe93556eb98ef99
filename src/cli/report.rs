//! Text rendering of projections, booking groups and credit-note totals.

use treso_core::{
    BalanceProjection, CategoryTotal, CreditNoteTotals, CurrencyFormatter, DateFormatter,
    FcfaFormatter, FrenchDateFormatter, StatusTotal,
};
use treso_domain::{BookingGroup, TransactionKind};

use super::{
    style::UiStyle,
    table::{Table, TableColumn},
};

const AMOUNT_WIDTH: usize = 18;

/// Renders report sections with a shared currency label and style.
pub struct ReportRenderer<'a> {
    style: &'a UiStyle,
    currency: String,
    amounts: FcfaFormatter,
    dates: FrenchDateFormatter,
}

impl<'a> ReportRenderer<'a> {
    pub fn new(style: &'a UiStyle, currency: impl Into<String>) -> Self {
        Self {
            style,
            currency: currency.into(),
            amounts: FcfaFormatter,
            dates: FrenchDateFormatter,
        }
    }

    fn money(&self, amount: i64) -> String {
        self.amounts.format_amount(amount, &self.currency)
    }

    fn unsigned(&self, amount: u64) -> String {
        self.money(i64::try_from(amount).unwrap_or(i64::MAX))
    }

    pub fn summary(&self, projection: &BalanceProjection) -> String {
        let rows = [
            ("Solde actuel", projection.baseline),
            ("Solde prévisionnel", projection.projected_balance),
            ("Solde minimum", projection.minimum_balance),
        ];
        let window = projection.window;
        let last_day = window.end.pred_opt().unwrap_or(window.end);
        let mut out = self.style.header(&format!(
            "Trésorerie du {} au {}",
            self.dates.format_date(window.start),
            self.dates.format_date(last_day)
        ));
        out.push('\n');
        for (label, value) in rows {
            let amount = self.money(value);
            out.push_str(&format!(
                "{:<22}{}\n",
                label,
                self.style.apply_balance_style(&amount, value)
            ));
        }
        out.push_str(&format!(
            "{:<22}{}\n{:<22}{}\n",
            "Encaissements prévus",
            self.unsigned(projection.total_inflow),
            "Décaissements prévus",
            self.unsigned(projection.total_outflow),
        ));
        out
    }

    pub fn buckets(&self, projection: &BalanceProjection) -> String {
        let mut table = Table::new(
            Some("Projection par semaine"),
            vec![
                TableColumn::new("Période", 25),
                TableColumn::numeric("Encaissements", AMOUNT_WIDTH),
                TableColumn::numeric("Décaissements", AMOUNT_WIDTH),
                TableColumn::numeric("Solde", AMOUNT_WIDTH),
            ],
        );
        for bucket in &projection.buckets {
            let last_day = bucket.window.end.pred_opt().unwrap_or(bucket.window.end);
            table.add_row(vec![
                format!(
                    "{} - {}",
                    self.dates.format_date(bucket.window.start),
                    self.dates.format_date(last_day)
                ),
                self.unsigned(bucket.inflow),
                self.unsigned(bucket.outflow),
                self.money(bucket.running_balance),
            ]);
        }
        table.render(self.style)
    }

    pub fn statuses(&self, rows: &[StatusTotal]) -> String {
        let mut table = Table::new(
            Some("Par niveau de confiance"),
            vec![
                TableColumn::new("Statut", 12),
                TableColumn::numeric("Encaissements", AMOUNT_WIDTH),
                TableColumn::numeric("Décaissements", AMOUNT_WIDTH),
                TableColumn::numeric("Mouvements", 10),
            ],
        );
        for row in rows {
            table.add_row(vec![
                row.status.to_string(),
                self.unsigned(row.inflow),
                self.unsigned(row.outflow),
                row.count.to_string(),
            ]);
        }
        table.render(self.style)
    }

    pub fn categories(&self, rows: &[CategoryTotal]) -> String {
        let mut table = Table::new(
            Some("Par catégorie"),
            vec![
                TableColumn::new("Sens", 13),
                TableColumn::new("Catégorie", 24),
                TableColumn::numeric("Montant", AMOUNT_WIDTH),
                TableColumn::numeric("Mouvements", 10),
            ],
        );
        for row in rows {
            let amount = match row.kind {
                TransactionKind::Encaissement => self.unsigned(row.amount),
                TransactionKind::Decaissement => self.money(row.kind.apply_sign(row.amount)),
            };
            table.add_row(vec![
                row.kind.to_string(),
                row.category.clone(),
                amount,
                row.count.to_string(),
            ]);
        }
        table.render(self.style)
    }

    pub fn bookings(&self, groups: &[BookingGroup]) -> String {
        let mut table = Table::new(
            Some("Bookings en attente"),
            vec![
                TableColumn::new("Booking", 14),
                TableColumn::new("Client", 22),
                TableColumn::new("Navire", 18),
                TableColumn::new("ETA", 10),
                TableColumn::numeric("Conteneurs", 10),
            ],
        );
        for group in groups {
            table.add_row(vec![
                group.booking_number.clone(),
                group.client_name.clone(),
                group.vessel.clone().unwrap_or_else(|| "-".into()),
                group
                    .eta
                    .map(|date| self.dates.format_date(date))
                    .unwrap_or_else(|| "-".into()),
                group.container_count.to_string(),
            ]);
        }
        table.render(self.style)
    }

    pub fn credit_notes(&self, totals: &CreditNoteTotals) -> String {
        let mut out = self.style.header("Avoirs");
        out.push('\n');
        for (label, amount) in [
            ("Total hors annulés", totals.non_cancelled),
            ("Imputés", totals.applied),
            ("En attente", totals.pending),
            ("Remboursés", totals.refunded),
        ] {
            out.push_str(&format!("{:<22}{}\n", label, self.unsigned(amount)));
        }
        out
    }
}
