//! OFX documents for unit tests.

pub const SGML_HEADER: &str = "OFXHEADER:100\r\nDATA:OFXSGML\r\nVERSION:102\r\nSECURITY:NONE\r\nENCODING:USASCII\r\nCHARSET:1252\r\nCOMPRESSION:NONE\r\nOLDFILEUID:NONE\r\nNEWFILEUID:NONE\r\n\r\n";

/// An SGML `<STMTTRN>` block; `memo` and `name` are left out when `None`.
pub fn stmttrn(kind: &str, date: &str, amount: &str, fitid: &str, memo: Option<&str>, name: Option<&str>) -> String {
    let mut block = format!("<STMTTRN>\r\n<TRNTYPE>{kind}\r\n<DTPOSTED>{date}\r\n<TRNAMT>{amount}\r\n<FITID>{fitid}\r\n");

    if let Some(name) = name {
        block.push_str(&format!("<NAME>{name}\r\n"));
    }

    if let Some(memo) = memo {
        block.push_str(&format!("<MEMO>{memo}\r\n"));
    }

    block.push_str("</STMTTRN>\r\n");
    block
}

/// A complete SGML bank statement export holding the given `<STMTTRN>` blocks.
pub fn bank_statement(transactions: &[String]) -> String {
    format!(
        "{SGML_HEADER}<OFX>\r\n<SIGNONMSGSRSV1>\r\n<SONRS>\r\n<STATUS>\r\n<CODE>0\r\n<SEVERITY>INFO\r\n</STATUS>\r\n<DTSERVER>20240131120000[-5:EST]\r\n<LANGUAGE>ENG\r\n</SONRS>\r\n</SIGNONMSGSRSV1>\r\n<BANKMSGSRSV1>\r\n<STMTTRNRS>\r\n<TRNUID>1\r\n<STATUS>\r\n<CODE>0\r\n<SEVERITY>INFO\r\n</STATUS>\r\n<STMTRS>\r\n<CURDEF>USD\r\n<BANKACCTFROM>\r\n<BANKID>121000248\r\n<ACCTID>000123456789\r\n<ACCTTYPE>CHECKING\r\n</BANKACCTFROM>\r\n<BANKTRANLIST>\r\n<DTSTART>20240101\r\n<DTEND>20240131\r\n{}</BANKTRANLIST>\r\n<LEDGERBAL>\r\n<BALAMT>1234.56\r\n<DTASOF>20240131\r\n</LEDGERBAL>\r\n</STMTRS>\r\n</STMTTRNRS>\r\n</BANKMSGSRSV1>\r\n</OFX>\r\n",
        transactions.concat()
    )
}

/// A complete XML credit card statement export holding `(amount, fitid, memo)` rows.
pub fn credit_card_statement(transactions: &[(&str, &str, &str)]) -> String {
    let rows: String = transactions.iter()
        .map(|(amount, fitid, memo)| format!(
            "<STMTTRN><TRNTYPE>DEBIT</TRNTYPE><DTPOSTED>20240210000000.000[-8:PST]</DTPOSTED><TRNAMT>{amount}</TRNAMT><FITID>{fitid}</FITID><MEMO>{memo}</MEMO></STMTTRN>\n"
        ))
        .collect();

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<?OFX OFXHEADER=\"200\" VERSION=\"220\" SECURITY=\"NONE\" OLDFILEUID=\"NONE\" NEWFILEUID=\"NONE\"?>\n<OFX>\n<CREDITCARDMSGSRSV1>\n<CCSTMTTRNRS>\n<TRNUID>0</TRNUID>\n<CCSTMTRS>\n<CURDEF>CAD</CURDEF>\n<CCACCTFROM><ACCTID>4111111111111111</ACCTID></CCACCTFROM>\n<BANKTRANLIST>\n{rows}</BANKTRANLIST>\n<LEDGERBAL><BALAMT>-250.00</BALAMT><DTASOF>20240229</DTASOF></LEDGERBAL>\n</CCSTMTRS>\n</CCSTMTTRNRS>\n</CREDITCARDMSGSRSV1>\n</OFX>\n"
    )
}
