use std::io;

use crate::error::Result;

/// One CSV writer per emitted table. The writers are supplied by the caller
/// so a run can target files, pipes or in-memory buffers alike.
pub struct Output<W: io::Write> {
    pub films: csv::Writer<W>,
    pub inventory: csv::Writer<W>,
    pub customers: csv::Writer<W>,
    pub rentals: csv::Writer<W>,
    pub payments: csv::Writer<W>,
}

impl<W: io::Write> Output<W> {
    pub fn flush(&mut self) -> Result<()> {
        self.films.flush()?;
        self.inventory.flush()?;
        self.customers.flush()?;
        self.rentals.flush()?;
        self.payments.flush()?;

        Ok(())
    }
}
