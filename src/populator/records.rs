//! Parsing of the `;`-delimited seed records.
//!
//! Each parser turns one line into the typed inputs of the matching DAO insert.
//! Malformed lines become [`Error::Parse`] naming the file and the line number.

use crate::{
    core::{
        client::NewClient, contact::NewContact, employee::NewEmployee, product::NewProduct,
        sale::{NewSale, SaleLine}, supplier::NewSupplier,
    },
    entities::Role,
    errors::{Error, Result},
};
use chrono::NaiveDate;
use std::str::FromStr;

const FIELD_SEPARATOR: char = ';';
const ITEM_SEPARATOR: char = '#';
const PAIR_SEPARATOR: char = '&';
const DATE_FORMAT: &str = "%d/%m/%Y";

/// Position of a record inside its file, for error messages.
#[derive(Debug, Clone, Copy)]
pub struct Origin<'a> {
    /// File name, e.g. `clientes.txt`
    pub file: &'a str,
    /// 1-based line number
    pub line: usize,
}

impl Origin<'_> {
    fn error(&self, message: impl Into<String>) -> Error {
        Error::Parse {
            file: self.file.to_string(),
            line: self.line,
            message: message.into(),
        }
    }
}

/// A seed record together with the contact it owns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WithContact<T> {
    /// The owner fields
    pub record: T,
    /// The contact fields
    pub contact: NewContact,
}

/// A sale header with its lines.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRecord {
    /// Header fields
    pub sale: NewSale,
    /// Product lines in file order
    pub lines: Vec<SaleLine>,
}

/// Login and clear password of a seed user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Login name
    pub login: String,
    /// Clear-text password, hashed on insert
    pub password: String,
}

fn fields<'a>(origin: Origin<'_>, line: &'a str, expected: usize) -> Result<Vec<&'a str>> {
    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).map(str::trim).collect();
    if fields.len() < expected {
        return Err(origin.error(format!(
            "expected {expected} fields, found {}",
            fields.len()
        )));
    }
    Ok(fields)
}

fn number<T: FromStr>(origin: Origin<'_>, what: &str, raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| origin.error(format!("{what} is not a number: '{raw}'")))
}

fn date(origin: Origin<'_>, raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT)
        .map_err(|e| origin.error(format!("invalid date '{raw}': {e}")))
}

/// `name;dd/MM/yyyy;national_id;email;phone;address`
pub fn parse_client(origin: Origin<'_>, line: &str) -> Result<WithContact<NewClient>> {
    let f = fields(origin, line, 6)?;
    Ok(WithContact {
        record: NewClient {
            name: f[0].to_string(),
            birth_date: date(origin, f[1])?,
            national_id: f[2].to_string(),
            email: f[3].to_string(),
        },
        contact: NewContact::new(f[4], f[5]),
    })
}

/// `name;national_id;role_ordinal;phone;address`
pub fn parse_employee(origin: Origin<'_>, line: &str) -> Result<WithContact<NewEmployee>> {
    let f = fields(origin, line, 5)?;
    let ordinal: usize = number(origin, "role", f[2])?;
    let role = Role::from_ordinal(ordinal)
        .ok_or_else(|| origin.error(format!("unknown role code {ordinal}")))?;
    Ok(WithContact {
        record: NewEmployee::new(f[0], f[1], role),
        contact: NewContact::new(f[3], f[4]),
    })
}

/// `name;tax_id;responsible;phone;address`
pub fn parse_supplier(origin: Origin<'_>, line: &str) -> Result<WithContact<NewSupplier>> {
    let f = fields(origin, line, 5)?;
    Ok(WithContact {
        record: NewSupplier {
            name: f[0].to_string(),
            tax_id: f[1].to_string(),
            responsible: f[2].to_string(),
        },
        contact: NewContact::new(f[3], f[4]),
    })
}

/// `name`
pub fn parse_category(origin: Origin<'_>, line: &str) -> Result<String> {
    let f = fields(origin, line, 1)?;
    Ok(f[0].to_string())
}

/// `name;category_id;supplier_id;stock;price`
pub fn parse_product(origin: Origin<'_>, line: &str) -> Result<NewProduct> {
    let f = fields(origin, line, 5)?;
    Ok(NewProduct {
        name: f[0].to_string(),
        category_id: number(origin, "category id", f[1])?,
        supplier_id: number(origin, "supplier id", f[2])?,
        stock: number(origin, "stock", f[3])?,
        price: number(origin, "price", f[4])?,
    })
}

/// `product_id&quantity` groups separated by `#`, e.g. `3&2#5&1`.
///
/// Trailing separators are ignored, so `3&2#` is one group.
pub fn parse_sale_lines(origin: Origin<'_>, raw: &str) -> Result<Vec<SaleLine>> {
    raw.trim_end_matches(ITEM_SEPARATOR)
        .split(ITEM_SEPARATOR)
        .map(|group| -> Result<SaleLine> {
            let (product, quantity) = group
                .split_once(PAIR_SEPARATOR)
                .ok_or_else(|| origin.error(format!("sale item '{group}' lacks '&'")))?;
            Ok(SaleLine {
                product_id: number(origin, "product id", product.trim())?,
                quantity: number(origin, "quantity", quantity.trim())?,
            })
        })
        .collect()
}

/// `client_id;employee_id;items;total;dd/MM/yyyy`
pub fn parse_sale(origin: Origin<'_>, line: &str) -> Result<SaleRecord> {
    let f = fields(origin, line, 5)?;
    Ok(SaleRecord {
        sale: NewSale {
            client_id: number(origin, "client id", f[0])?,
            employee_id: number(origin, "employee id", f[1])?,
            total: number(origin, "total", f[3])?,
            date: date(origin, f[4])?,
        },
        lines: parse_sale_lines(origin, f[2])?,
    })
}

/// `login;password`
pub fn parse_user(origin: Origin<'_>, line: &str) -> Result<UserRecord> {
    let f = fields(origin, line, 2)?;
    Ok(UserRecord {
        login: f[0].to_string(),
        password: f[1].to_string(),
    })
}
