use crate::sgml::errors::SyntaxError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token<'a> {
    Start {
        name: &'a str,
        line: usize
    },
    End {
        name: &'a str,
        line: usize
    },
    Text {
        value: &'a str,
        line: usize
    }
}

/// Cursor over the tag body producing start tags, end tags and trimmed text runs.
///
/// Comments, processing instructions and `<!...>` declarations are skipped. Attributes on
/// start tags are ignored, and a self-closing `<NAME/>` yields a start followed by an end.
pub(crate) struct Tokenizer<'a> {
    input: &'a str,
    position: usize,
    line: usize,
    pending: Option<Token<'a>>,
    failed: bool
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            position: 0,
            line: 1,
            pending: None,
            failed: false
        }
    }

    fn advance(&mut self, length: usize) {
        let consumed = &self.input[self.position..self.position + length];
        self.line += consumed.matches('\n').count();
        self.position += length;
    }

    fn skip_markup(&mut self, terminator: &str) -> Result<(), SyntaxError> {
        let rest = &self.input[self.position..];

        match rest.find(terminator) {
            Some(end) => {
                self.advance(end + terminator.len());
                Ok(())
            }
            None => Err(SyntaxError::UnterminatedMarkup { line: self.line })
        }
    }

    fn read_tag(&mut self) -> Result<Token<'a>, SyntaxError> {
        let input = self.input;
        let rest = &input[self.position..];
        let line = self.line;

        //NOTE: A '<' before the closing '>' means the tag was cut off mid-document
        let end = match rest[1..].find(['<', '>']) {
            Some(index) if rest.as_bytes()[index + 1] == b'>' => index + 1,
            _ => return Err(SyntaxError::UnterminatedTag { line })
        };

        let body = &rest[1..end];
        self.advance(end + 1);

        if let Some(name) = body.strip_prefix('/') {
            return Ok(Token::End { name: validate_name(name.trim(), line)?, line });
        }

        let self_closing = body.ends_with('/');
        let body = body.strip_suffix('/').unwrap_or(body);
        let name = body.split(char::is_whitespace).next().unwrap_or_default();
        let name = validate_name(name, line)?;

        if self_closing {
            self.pending = Some(Token::End { name, line });
        }

        Ok(Token::Start { name, line })
    }

    fn read_text(&mut self) -> Option<Token<'a>> {
        let input = self.input;
        let rest = &input[self.position..];
        let length = rest.find('<').unwrap_or(rest.len());
        let raw = &rest[..length];
        let leading = raw.len() - raw.trim_start().len();
        let line = self.line + raw[..leading].matches('\n').count();

        self.advance(length);

        let value = raw.trim();
        (!value.is_empty()).then_some(Token::Text { value, line })
    }

    fn next_token(&mut self) -> Result<Option<Token<'a>>, SyntaxError> {
        if let Some(token) = self.pending.take() {
            return Ok(Some(token));
        }

        while self.position < self.input.len() {
            let rest = &self.input[self.position..];

            if rest.starts_with("<!--") {
                self.skip_markup("-->")?;
            } else if rest.starts_with("<?") {
                self.skip_markup("?>")?;
            } else if rest.starts_with("<!") {
                self.skip_markup(">")?;
            } else if rest.starts_with('<') {
                return self.read_tag().map(Some);
            } else if let Some(token) = self.read_text() {
                return Ok(Some(token));
            }
        }

        Ok(None)
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, SyntaxError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(error) => {
                self.failed = true;
                Some(Err(error))
            }
        }
    }
}

fn validate_name(name: &str, line: usize) -> Result<&str, SyntaxError> {
    if name.is_empty() {
        return Err(SyntaxError::EmptyTagName { line });
    }

    let valid = name.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | ':'));

    if !valid || !name.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Err(SyntaxError::InvalidTagName { name: name.to_string(), line });
    }

    Ok(name)
}
