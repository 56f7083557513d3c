use super::db::Db;
use crate::libs::product::Product;
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

const INSERT_PRODUCT: &str = "INSERT INTO products (name, unit, rate, created_at) VALUES (?1, ?2, ?3, datetime(CURRENT_TIMESTAMP, 'localtime'))";
const SELECT_PRODUCTS: &str = "SELECT id, name, unit, rate, created_at FROM products ORDER BY name";
const SELECT_PRODUCT: &str = "SELECT id, name, unit, rate, created_at FROM products WHERE id = ?1";
const UPDATE_PRODUCT: &str = "UPDATE products SET name = ?2, unit = ?3, rate = ?4 WHERE id = ?1";
const DELETE_PRODUCT: &str = "DELETE FROM products WHERE id = ?1";

pub struct Products {
    pub conn: Connection,
}

impl Products {
    pub fn new() -> Result<Products> {
        let db = Db::new()?;
        Ok(Products { conn: db.conn })
    }

    pub fn insert(&mut self, product: &Product) -> Result<i64> {
        self.conn.execute(INSERT_PRODUCT, params![product.name, product.unit, product.rate])?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn fetch_all(&mut self) -> Result<Vec<Product>> {
        let mut stmt = self.conn.prepare(SELECT_PRODUCTS)?;
        let product_iter = stmt.query_map([], |row| {
            Ok(Product {
                id: row.get(0)?,
                name: row.get(1)?,
                unit: row.get(2)?,
                rate: row.get(3)?,
                created_at: row.get(4)?,
            })
        })?;
        let mut products = Vec::new();
        for product in product_iter {
            products.push(product?);
        }
        Ok(products)
    }

    pub fn fetch(&mut self, id: i64) -> Result<Option<Product>> {
        let product = self
            .conn
            .query_row(SELECT_PRODUCT, params![id], |row| {
                Ok(Product {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    unit: row.get(2)?,
                    rate: row.get(3)?,
                    created_at: row.get(4)?,
                })
            })
            .optional()?;
        Ok(product)
    }

    pub fn update(&mut self, id: i64, product: &Product) -> Result<()> {
        self.conn.execute(UPDATE_PRODUCT, params![id, product.name, product.unit, product.rate])?;
        Ok(())
    }

    pub fn delete(&mut self, id: i64) -> Result<()> {
        self.conn.execute(DELETE_PRODUCT, params![id])?;
        Ok(())
    }
}
