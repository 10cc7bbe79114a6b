use std::fmt;

// useful for writing string literals, to ensure that a gigantic string doesnt swamp the output
pub fn trim_str(target: &str, maxlen: usize) -> TrimStr<'_> {
    TrimStr {
        target,
        maxlen,
    }
}

// captures the arguments to trim_str(), to implement trimming in fmt() without requiring an extra string buffer
pub struct TrimStr<'s> {
    target: &'s str,
    maxlen: usize,
}

impl<'s> fmt::Display for TrimStr<'s> {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cutoff = self.maxlen.saturating_sub(3);
        match self.target.char_indices().nth(cutoff) {
            Some((idx, _)) if self.target.chars().count() > self.maxlen 
                => write!(fmt, "{}...", &self.target[..idx]),
            _ => fmt.write_str(self.target),
        }
    }
}


pub fn delegate_fmt<F>(fmt_func: F) -> impl fmt::Display where F: Fn(&mut fmt::Formatter<'_>) -> fmt::Result {
    FnFormatter { fmt_func }
}

struct FnFormatter<F> where F: Fn(&mut fmt::Formatter<'_>) -> fmt::Result {
    fmt_func: F,
}

impl<F> fmt::Display for FnFormatter<F> where F: Fn(&mut fmt::Formatter<'_>) -> fmt::Result {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        (self.fmt_func)(fmt)
    }
}


/// Writes each item with a separator in between.
pub fn fmt_join<T: fmt::Display>(fmt: &mut fmt::Formatter<'_>, sep: &str, items: impl IntoIterator<Item=T>) -> fmt::Result {
    for (idx, item) in items.into_iter().enumerate() {
        if idx > 0 {
            fmt.write_str(sep)?;
        }
        write!(fmt, "{}", item)?;
    }
    Ok(())
}
