//! `Display` formatting for [`ArrayValue`].

use core::fmt::{self, Write};

use crate::dtype::{Element, dispatch_kind};
use crate::error::Result;

use super::ArrayValue;

impl fmt::Display for ArrayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let body: Result<String> = dispatch_kind!(self.kind, "display", |T| {
            self.as_slice::<T>().map(|data| render(data, &self.shape))
        });
        match body {
            Ok(body) => write!(f, "array({body}, kind={})", self.kind),
            Err(_) => write!(f, "array(<{}>, shape={:?})", self.kind, self.shape),
        }
    }
}

fn render<T: Element>(data: &[T], shape: &[usize]) -> String {
    let mut s = String::new();
    // Writing into a String cannot fail.
    let _ = write_body(&mut s, data, shape);
    s
}

fn write_body<T: Element>(s: &mut String, data: &[T], shape: &[usize]) -> fmt::Result {
    if data.is_empty() {
        return write!(s, "[], shape={shape:?}");
    }

    match shape.len() {
        0 => write!(s, "{}", data[0]),
        1 => write_row(s, data),
        2 => {
            let cols = shape[1];
            writeln!(s, "[")?;
            for (r, row) in data.chunks(cols).enumerate() {
                write!(s, "  ")?;
                write_row(s, row)?;
                if r + 1 < shape[0] {
                    writeln!(s, ",")?;
                } else {
                    writeln!(s)?;
                }
            }
            write!(s, "]")
        }
        _ => {
            // 3-D and above: shape plus a flat summary
            write!(s, "shape={shape:?}, data=[{}", data[0])?;
            if data.len() > 2 {
                write!(s, ", {}, ...", data[1])?;
            }
            if data.len() > 1 {
                write!(s, ", {}", data[data.len() - 1])?;
            }
            write!(s, "]")
        }
    }
}

fn write_row<T: Element>(s: &mut String, row: &[T]) -> fmt::Result {
    write!(s, "[")?;
    for (i, v) in row.iter().enumerate() {
        if i > 0 {
            write!(s, ", ")?;
        }
        write!(s, "{v}")?;
    }
    write!(s, "]")
}
