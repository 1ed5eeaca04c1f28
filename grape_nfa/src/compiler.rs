use crate::{
    nfa::{Fragment, StateId, NFA},
    token::{ByteClass, Operator, Token},
    CompileError, CompileResult,
};

/// The configuration used for compiling a postfix token stream into an
/// NFA.
#[derive(Clone, Debug, Default)]
pub struct Config {
    state_limit: Option<usize>,
}

impl Config {
    /// Return a new default configuration. There is no limit on the number
    /// of states.
    pub fn new() -> Config {
        Config::default()
    }

    /// Set a limit on how many states a single compilation may create.
    ///
    /// Every operand and every operator adds two states, so the NFA grows
    /// linearly with the pattern. The limit is useful when patterns come
    /// from untrusted input. When it is exceeded, compilation fails with
    /// [`CompileError::TooComplex`].
    pub fn state_limit(mut self, limit: Option<usize>) -> Config {
        self.state_limit = limit;
        self
    }

    pub fn get_state_limit(&self) -> Option<usize> {
        self.state_limit
    }
}

/// Compiler that converts a postfix token stream into a Thompson NFA.
///
/// Each operand becomes a fragment with its own start and accept states;
/// each operator pops the fragments it needs off an operand stack and
/// wires them together with epsilon edges.
#[derive(Clone, Debug, Default)]
pub struct Compiler {
    config: Config,
}

impl Compiler {
    /// Create a new compiler with the default configuration.
    pub fn new() -> Self {
        Self { config: Config::default() }
    }

    /// Apply the given configuration to this compiler.
    pub fn configure(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Compile postfix tokens to a Thompson NFA.
    ///
    /// Fails when an operator finds too few operands, or when the tokens do
    /// not reduce to exactly one fragment (this includes an empty token
    /// stream). No partial NFA is ever returned.
    pub fn compile(&self, postfix: &[Token]) -> CompileResult<NFA> {
        let mut builder = Builder {
            nfa: NFA::new(),
            stack: Vec::new(),
            limit: self.config.state_limit,
        };
        for token in postfix {
            builder.push(token)?;
        }
        let nfa = builder.finish()?;
        debug!(
            "compiled {} postfix tokens into an NFA with {} states",
            postfix.len(),
            nfa.len()
        );
        Ok(nfa)
    }
}

/// The state of a single compilation.
struct Builder {
    nfa: NFA,
    stack: Vec<Fragment>,
    limit: Option<usize>,
}

impl Builder {
    fn push(&mut self, token: &Token) -> CompileResult<()> {
        match token {
            Token::Literal(byte) => self.compile_literal(*byte),
            Token::CharClass(class) => self.compile_class(class),
            Token::Dot => self.compile_class(&ByteClass::any_except_newline()),
            Token::Concat => self.compile_concat(),
            Token::Alt => self.compile_alternation(),
            Token::Star => self.compile_star(),
            Token::Question => self.compile_question(),
            Token::Plus => self.compile_plus(),
            // Grouping is fully expressed by postfix order.
            Token::LParen | Token::RParen => Ok(()),
        }
    }

    /// The last fragment left on the stack becomes the automaton.
    fn finish(mut self) -> CompileResult<NFA> {
        if self.stack.len() != 1 {
            return Err(CompileError::UnterminatedExpression {
                fragments: self.stack.len(),
            });
        }
        let fragment = self.stack[0];
        self.nfa.finish(fragment);
        Ok(self.nfa)
    }

    /// Allocate a fresh (start, accept) pair.
    fn new_pair(&mut self) -> CompileResult<(StateId, StateId)> {
        if let Some(limit) = self.limit {
            if self.nfa.len() + 2 > limit {
                return Err(CompileError::TooComplex { limit });
            }
        }
        Ok((self.nfa.add_state(), self.nfa.add_state()))
    }

    /// Pop the operands of `op`, the last one pushed first.
    fn pop(&mut self, op: Operator) -> CompileResult<Fragment> {
        self.stack.pop().ok_or(CompileError::InsufficientOperands(op))
    }

    /// Fail early, before anything is popped, if `op` lacks operands.
    fn require(&self, op: Operator) -> CompileResult<()> {
        if self.stack.len() < op.arity() {
            return Err(CompileError::InsufficientOperands(op));
        }
        Ok(())
    }

    fn compile_literal(&mut self, byte: u8) -> CompileResult<()> {
        let (start, accept) = self.new_pair()?;
        self.nfa.add_byte(start, byte, accept);
        self.stack.push(Fragment { start, accept });
        Ok(())
    }

    /// One byte edge per member of the class.
    fn compile_class(&mut self, class: &ByteClass) -> CompileResult<()> {
        let (start, accept) = self.new_pair()?;
        for byte in class.iter() {
            self.nfa.add_byte(start, byte, accept);
        }
        self.stack.push(Fragment { start, accept });
        Ok(())
    }

    /// `ab`: a.accept -ε-> b.start
    fn compile_concat(&mut self) -> CompileResult<()> {
        self.require(Operator::Concat)?;
        let b = self.pop(Operator::Concat)?;
        let a = self.pop(Operator::Concat)?;
        self.nfa.add_epsilon(a.accept, b.start);
        self.stack.push(Fragment { start: a.start, accept: b.accept });
        Ok(())
    }

    /// `a|b`: a fresh start splits into both branches, and both branches
    /// join at a fresh accept.
    fn compile_alternation(&mut self) -> CompileResult<()> {
        self.require(Operator::Alt)?;
        let b = self.pop(Operator::Alt)?;
        let a = self.pop(Operator::Alt)?;
        let (start, accept) = self.new_pair()?;
        self.nfa.add_epsilon(start, a.start);
        self.nfa.add_epsilon(start, b.start);
        self.nfa.add_epsilon(a.accept, accept);
        self.nfa.add_epsilon(b.accept, accept);
        self.stack.push(Fragment { start, accept });
        Ok(())
    }

    /// `a*`: enter the loop or skip it; after each pass, repeat or exit.
    fn compile_star(&mut self) -> CompileResult<()> {
        let a = self.pop(Operator::Star)?;
        let (start, accept) = self.new_pair()?;
        self.nfa.add_epsilon(start, a.start);
        self.nfa.add_epsilon(start, accept);
        self.nfa.add_epsilon(a.accept, a.start);
        self.nfa.add_epsilon(a.accept, accept);
        self.stack.push(Fragment { start, accept });
        Ok(())
    }

    /// `a?`: pass through `a` once or skip it.
    fn compile_question(&mut self) -> CompileResult<()> {
        let a = self.pop(Operator::Question)?;
        let (start, accept) = self.new_pair()?;
        self.nfa.add_epsilon(start, a.start);
        self.nfa.add_epsilon(start, accept);
        self.nfa.add_epsilon(a.accept, accept);
        self.stack.push(Fragment { start, accept });
        Ok(())
    }

    /// `a+`: like `a*` without the edge that skips `a`.
    fn compile_plus(&mut self) -> CompileResult<()> {
        let a = self.pop(Operator::Plus)?;
        let (start, accept) = self.new_pair()?;
        self.nfa.add_epsilon(start, a.start);
        self.nfa.add_epsilon(a.accept, a.start);
        self.nfa.add_epsilon(a.accept, accept);
        self.stack.push(Fragment { start, accept });
        Ok(())
    }
}
