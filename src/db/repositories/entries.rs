use crate::calendar::days_in_month;
use crate::db::{
    models::{DayEntry, EntryField},
    Database,
};
use anyhow::Result;
use rusqlite::{params, Connection, Row};

pub struct EntryRepository<'a> {
    conn: &'a Connection,
}

impl<'a> EntryRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<DayEntry> {
        Ok(DayEntry {
            id: row.get(0)?,
            year: row.get(1)?,
            month: row.get(2)?,
            day: row.get(3)?,
            morning_weight: row.get(4)?,
            evening_weight: row.get(5)?,
            steps: row.get(6)?,
        })
    }

    /// All entries for a month, ordered by day.
    pub fn entries_for_month(&self, year: i32, month: u32) -> Result<Vec<DayEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, year, month, day, morning_weight, evening_weight, steps
             FROM entries
             WHERE year = ?1 AND month = ?2
             ORDER BY day",
        )?;

        let entries = stmt
            .query_map(params![year, month], Self::entry_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    /// All entries for a year, ordered by month then day.
    pub fn entries_for_year(&self, year: i32) -> Result<Vec<DayEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, year, month, day, morning_weight, evening_weight, steps
             FROM entries
             WHERE year = ?1
             ORDER BY month, day",
        )?;

        let entries = stmt
            .query_map(params![year], Self::entry_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(entries)
    }

    pub fn entry_exists(&self, year: i32, month: u32, day: u32) -> Result<bool> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM entries WHERE year = ?1 AND month = ?2 AND day = ?3)",
            params![year, month, day],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    pub fn month_exists(&self, year: i32, month: u32) -> Result<bool> {
        let exists = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM entries WHERE year = ?1 AND month = ?2)",
            params![year, month],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Insert a row with no readings for (year, month, day).
    pub fn insert_blank(&self, year: i32, month: u32, day: u32) -> Result<()> {
        self.conn.execute(
            "INSERT INTO entries (year, month, day) VALUES (?1, ?2, ?3)",
            params![year, month, day],
        )?;
        Ok(())
    }

    /// Upsert one field by natural key.
    ///
    /// Updates the single column when the row exists; otherwise inserts a new
    /// row with only that field populated. Sibling fields are never touched.
    pub fn update_field(&self, year: i32, month: u32, day: u32, field: EntryField) -> Result<()> {
        let sql = format!(
            "INSERT INTO entries (year, month, day, {col}) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(year, month, day) DO UPDATE SET {col} = excluded.{col}",
            col = field.column()
        );

        match field {
            EntryField::MorningWeight(value) | EntryField::EveningWeight(value) => {
                self.conn.execute(&sql, params![year, month, day, value])?;
            }
            EntryField::Steps(value) => {
                self.conn.execute(&sql, params![year, month, day, value])?;
            }
        }
        Ok(())
    }
}

// Database async wrappers for entry operations
impl Database {
    pub async fn entries_for_month(&self, year: i32, month: u32) -> Result<Vec<DayEntry>> {
        self.execute(move |conn| {
            let repo = EntryRepository::new(conn);
            repo.entries_for_month(year, month)
        })
        .await
    }

    pub async fn entries_for_year(&self, year: i32) -> Result<Vec<DayEntry>> {
        self.execute(move |conn| {
            let repo = EntryRepository::new(conn);
            repo.entries_for_year(year)
        })
        .await
    }

    pub async fn entry_exists(&self, year: i32, month: u32, day: u32) -> Result<bool> {
        self.execute(move |conn| {
            let repo = EntryRepository::new(conn);
            repo.entry_exists(year, month, day)
        })
        .await
    }

    pub async fn month_exists(&self, year: i32, month: u32) -> Result<bool> {
        self.execute(move |conn| {
            let repo = EntryRepository::new(conn);
            repo.month_exists(year, month)
        })
        .await
    }

    pub async fn update_field(
        &self,
        year: i32,
        month: u32,
        day: u32,
        field: EntryField,
    ) -> Result<()> {
        self.execute(move |conn| {
            let repo = EntryRepository::new(conn);
            repo.update_field(year, month, day, field)
        })
        .await
    }

    /// Create blank rows for every day of (year, month) unless any row for
    /// that month already exists.
    ///
    /// The existence check and the bulk insert run inside one transaction on
    /// the single storage thread, so concurrent navigation events cannot
    /// double-insert a month. Calling this again for a populated month is a
    /// no-op.
    pub async fn materialize_month(&self, year: i32, month: u32) -> Result<()> {
        self.execute(move |conn| {
            let tx = conn.transaction()?;
            {
                let repo = EntryRepository::new(&tx);
                if repo.month_exists(year, month)? {
                    return Ok(());
                }
                for day in 1..=days_in_month(year, month) {
                    repo.insert_blank(year, month, day)?;
                }
            }
            tx.commit()?;
            Ok(())
        })
        .await
    }
}
