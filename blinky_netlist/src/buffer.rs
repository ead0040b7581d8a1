use std::{
    fmt::Arguments,
    io::{self, Result, Write},
};

pub struct Buffer<W> {
    pub inner: W,
    pub tab: u8,
    indent: &'static str,
}

const TAB: &str = "    ";

impl<W: Write> Buffer<W> {
    pub fn new(inner: W) -> Self {
        Self::with_indent(inner, TAB)
    }

    pub fn with_indent(inner: W, indent: &'static str) -> Self {
        Self {
            inner,
            tab: 0,
            indent,
        }
    }

    pub fn write_char(&mut self, c: char) -> Result<()> {
        let mut b = [0; 4];
        let b = c.encode_utf8(&mut b).as_bytes();

        self.inner.write_all(b)
    }

    pub fn write_str(&mut self, s: &str) -> Result<()> {
        self.inner.write_all(s.as_bytes())
    }

    pub fn write_fmt(&mut self, args: Arguments<'_>) -> Result<()> {
        self.inner.write_fmt(args)
    }

    pub fn push_tab(&mut self) {
        self.tab += 1;
    }

    pub fn pop_tab(&mut self) {
        self.tab = self.tab.saturating_sub(1);
    }

    pub fn write_tab(&mut self) -> Result<()> {
        for _ in 0 .. self.tab {
            self.inner.write_all(self.indent.as_bytes())?;
        }

        Ok(())
    }

    #[inline]
    pub fn write_eol(&mut self) -> Result<()> {
        self.write_char('\n')
    }

    /// Writes an indented line.
    pub fn write_line(&mut self, args: Arguments<'_>) -> Result<()> {
        self.write_tab()?;
        self.write_fmt(args)?;
        self.write_eol()
    }

    pub fn write_template(&mut self, template: Arguments<'_>) -> Result<()> {
        for line in template.to_string().trim().lines() {
            self.write_tab()?;
            self.write_str(line)?;
            self.write_eol()?;
        }

        Ok(())
    }

    pub fn intersperse<T>(
        &mut self,
        sep: &str,
        iter: impl IntoIterator<Item = T>,
        f: impl Fn(&mut Self, T) -> Result<()>,
    ) -> Result<()> {
        let mut peekable = iter.into_iter().peekable();
        while let Some(item) = peekable.next() {
            f(self, item)?;
            if peekable.peek().is_some() {
                self.write_str(sep)?;
            }
        }

        Ok(())
    }

    #[inline]
    pub fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indents_lines() {
        let mut buffer = Buffer::with_indent(Vec::new(), "  ");
        buffer.write_line(format_args!("module")).unwrap();
        buffer.push_tab();
        buffer.write_line(format_args!("wire {}", 1)).unwrap();
        buffer.pop_tab();
        buffer.pop_tab();
        buffer.write_line(format_args!("end")).unwrap();

        assert_eq!(
            String::from_utf8(buffer.into_inner()).unwrap(),
            "module\n  wire 1\nend\n"
        );
    }

    #[test]
    fn intersperse_separates_items() {
        let mut buffer = Buffer::new(Vec::new());
        buffer
            .intersperse(", ", ["a", "b", "c"], |buffer, item| buffer.write_str(item))
            .unwrap();

        assert_eq!(String::from_utf8(buffer.into_inner()).unwrap(), "a, b, c");
    }
}
