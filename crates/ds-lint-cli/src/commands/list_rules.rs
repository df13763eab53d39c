//! List rules command implementation.

use ds_lint::rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!(
        "{:<9} {:<26} {:<8} {:<4} Description",
        "Code", "Name", "Default", "Fix"
    );
    println!("{}", "-".repeat(96));

    for rule in all_rules() {
        println!(
            "{:<9} {:<26} {:<8} {:<4} {}",
            rule.code(),
            rule.name(),
            rule.default_severity().to_string(),
            if rule.fixable() { "yes" } else { "-" },
            rule.description()
        );
    }

    println!("\nPresets:");
    println!("  recommended  - All rules at their default severity (default)");
    println!("  strict       - All rules, findings at their default level raised to error");
    println!("  minimal      - DS001, DS004 only (for gradual adoption)");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  ds-lint validate --rules no-raw-colors,no-foundation-tokens");
    println!("  ds-lint validate --rules DS001,DS003,A11Y001");
}
