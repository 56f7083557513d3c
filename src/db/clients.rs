use super::db::Db;
use crate::libs::client::Client;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

const INSERT_CLIENT: &str = "INSERT INTO clients (name, email, phone, created_at) VALUES (?1, ?2, ?3, datetime(CURRENT_TIMESTAMP, 'localtime'))";
const SELECT_CLIENTS: &str = "SELECT id, name, email, phone, created_at FROM clients ORDER BY name";
const SELECT_CLIENT: &str = "SELECT id, name, email, phone, created_at FROM clients WHERE id = ?1";
const UPDATE_CLIENT: &str = "UPDATE clients SET name = ?2, email = ?3, phone = ?4 WHERE id = ?1";
const DELETE_CLIENT: &str = "DELETE FROM clients WHERE id = ?1";
const COUNT_CLIENT_ENTRIES: &str = "SELECT COUNT(*) FROM time_entries WHERE client_id = ?1";

pub struct Clients {
    pub conn: Connection,
}

impl Clients {
    pub fn new() -> Result<Clients> {
        let db = Db::new()?;
        Ok(Clients { conn: db.conn })
    }

    pub fn insert(&mut self, client: &Client) -> Result<i64> {
        self.conn.execute(INSERT_CLIENT, params![client.name, client.email, client.phone])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn fetch_all(&mut self) -> Result<Vec<Client>> {
        let mut stmt = self.conn.prepare(SELECT_CLIENTS)?;
        let client_iter = stmt.query_map([], |row| {
            Ok(Client {
                id: row.get(0)?,
                name: row.get(1)?,
                email: row.get(2)?,
                phone: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?;
        let mut clients = Vec::new();
        for client in client_iter {
            clients.push(client?);
        }
        Ok(clients)
    }

    pub fn fetch(&mut self, id: i64) -> Result<Option<Client>> {
        let client = self
            .conn
            .query_row(SELECT_CLIENT, params![id], |row| {
                Ok(Client {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                    phone: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })
            .optional()?;
        Ok(client)
    }

    pub fn update(&mut self, id: i64, client: &Client) -> Result<()> {
        self.conn.execute(UPDATE_CLIENT, params![id, client.name, client.email, client.phone])?;
        Ok(())
    }

    /// True when the client is referenced by at least one time entry.
    /// Such clients are protected from deletion.
    pub fn has_entries(&mut self, id: i64) -> Result<bool> {
        let count: i64 = self.conn.query_row(COUNT_CLIENT_ENTRIES, params![id], |row| row.get(0))?;
        Ok(count > 0)
    }

    pub fn delete(&mut self, id: i64) -> Result<()> {
        self.conn.execute(DELETE_CLIENT, params![id])?;
        Ok(())
    }
}
