use tracing::{debug, warn};

use crate::models::RawTransaction;
use crate::sgml::{ParsedDocument, RawElement, StructuralParseError, SyntaxError};
use crate::statement::{LedgerBalance, Statement, StatementKind};
use crate::types::{decode_date, parse_amount};

const ROOT: &str = "OFX";
const TRANSACTION_LIST: &str = "BANKTRANLIST";
const TRANSACTION: &str = "STMTTRN";

/// Element names leading from a message set down to its statement response.
struct StatementPath {
    kind: StatementKind,
    message_set: &'static str,
    response: &'static str,
    statement: &'static str,
    account: &'static str
}

const STATEMENT_PATHS: [StatementPath; 2] = [
    StatementPath {
        kind: StatementKind::Bank,
        message_set: "BANKMSGSRSV1",
        response: "STMTTRNRS",
        statement: "STMTRS",
        account: "BANKACCTFROM"
    },
    StatementPath {
        kind: StatementKind::CreditCard,
        message_set: "CREDITCARDMSGSRSV1",
        response: "CCSTMTTRNRS",
        statement: "CCSTMTRS",
        account: "CCACCTFROM"
    }
];

/// Collects every statement response in the document, in document order.
///
/// # Errors
/// Returns `StructuralParseError` if the root is not `<OFX>` or no statement response
/// can be found under any bank or credit card message set.
pub fn extract_statements(document: &ParsedDocument) -> Result<Vec<Statement>, StructuralParseError> {
    let root = &document.root;

    if !root.is_named(ROOT) {
        return Err(StructuralParseError::missing_statement(SyntaxError::UnexpectedRoot {
            expected: ROOT,
            found: root.name.clone()
        }));
    }

    let mut statements = Vec::new();
    let mut first_gap: Option<SyntaxError> = None;

    for message_set in &root.children {
        let Some(path) = STATEMENT_PATHS.iter().find(|path| message_set.is_named(path.message_set)) else {
            continue;
        };

        for response in message_set.children_named(path.response) {
            match response.child(path.statement) {
                Some(statement) => statements.push(read_statement(path, statement)),
                None => {
                    warn!("<{}> at line {} carries no <{}>", response.name, response.line, path.statement);
                    first_gap.get_or_insert(SyntaxError::MissingElement {
                        parent: response.name.clone(),
                        child: path.statement,
                        line: response.line
                    });
                }
            }
        }
    }

    if statements.is_empty() {
        let cause = first_gap.unwrap_or(SyntaxError::NoStatementResponse);
        return Err(StructuralParseError::missing_statement(cause));
    }

    Ok(statements)
}

/// The raw transactions of every statement in the document, in document order.
pub fn extract_transactions(document: &ParsedDocument) -> Result<Vec<RawTransaction>, StructuralParseError> {
    let statements = extract_statements(document)?;

    Ok(statements.into_iter().flat_map(|statement| statement.transactions).collect())
}

fn read_statement(path: &StatementPath, statement: &RawElement) -> Statement {
    let account = statement.child(path.account);
    let account_value = |name: &str| account.and_then(|account| account.value(name)).map(str::to_string);

    let transactions = match statement.child(TRANSACTION_LIST) {
        Some(list) => list.children_named(TRANSACTION).map(RawTransaction::from_element).collect(),
        None => {
            debug!("<{}> at line {} has no <{TRANSACTION_LIST}>", statement.name, statement.line);
            Vec::new()
        }
    };

    Statement {
        kind: path.kind,
        currency: statement.value("CURDEF").map(str::to_string),
        account_id: account_value("ACCTID"),
        bank_id: account_value("BANKID"),
        account_type: account_value("ACCTTYPE"),
        ledger_balance: statement.child("LEDGERBAL").and_then(read_ledger_balance),
        transactions
    }
}

fn read_ledger_balance(balance: &RawElement) -> Option<LedgerBalance> {
    let amount = balance.value("BALAMT")?;

    let amount = parse_amount(amount)
        .inspect_err(|error| warn!("Ignoring ledger balance at line {}: {error}", balance.line))
        .ok()?;

    let as_of = balance.value("DTASOF").and_then(|value| {
        decode_date(value)
            .inspect_err(|error| warn!("Ignoring ledger balance date at line {}: {error}", balance.line))
            .ok()
    });

    Some(LedgerBalance { amount, as_of })
}
