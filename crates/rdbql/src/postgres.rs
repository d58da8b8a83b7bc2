//! `tokio-postgres` parameter binding for [`Value`].
//!
//! Enabled by the `postgres` feature. Pair it with the `postgres` dialect so
//! placeholders come out as `$1, $2, ...`:
//!
//! ```ignore
//! let q = rdbql::dialect("postgres").select_from("recipe").limit(10).build()?;
//! let rows = client.query(&q.sql, &q.params_ref()).await?;
//! ```

use crate::value::Value;
use bytes::BytesMut;
use std::error::Error;
use tokio_postgres::types::{IsNull, ToSql, Type};

impl ToSql for Value {
    fn to_sql(&self, ty: &Type, out: &mut BytesMut) -> Result<IsNull, Box<dyn Error + Sync + Send>> {
        match self {
            Value::Null => Ok(IsNull::Yes),
            Value::Bool(v) => v.to_sql(ty, out),
            // integers are stored widened; narrow to the column's width
            Value::Int(v) => match *ty {
                Type::INT2 => i16::try_from(*v)?.to_sql(ty, out),
                Type::INT4 => i32::try_from(*v)?.to_sql(ty, out),
                _ => v.to_sql(ty, out),
            },
            Value::Float(v) => match *ty {
                Type::FLOAT4 => (*v as f32).to_sql(ty, out),
                _ => v.to_sql(ty, out),
            },
            Value::Text(v) => v.to_sql(ty, out),
            Value::Bytes(v) => v.to_sql(ty, out),
            Value::Json(v) => v.to_sql(ty, out),
            Value::Uuid(v) => v.to_sql(ty, out),
            Value::Timestamp(v) => v.to_sql(ty, out),
        }
    }

    fn accepts(_ty: &Type) -> bool {
        // the variant decides; mismatches surface from the inner impl
        true
    }

    tokio_postgres::types::to_sql_checked!();
}
