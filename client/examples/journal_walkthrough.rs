use colored::Colorize;
use journal_client::{
    e2e_helpers::E2e,
    logs::{
        log_divider,
        log_outcome,
    },
    print_kv,
    LogColor,
};
use solana_address::Address;

fn main() -> anyhow::Result<()> {
    let owner = Address::new_from_array([1; 32]);
    let mut e2e = E2e::new_owner_and_journal(owner, "My Journal")?;
    print_kv!("Journal", format!("{:?}", e2e.journal.journal), LogColor::Header);

    let id = e2e.create_entry("This is a journal entry!")?;
    println!("{}", e2e.view_entry(id)?);

    let update = e2e
        .ledger
        .send_one(e2e.journal.update_entry(id, "This is an updated journal entry.")?);
    log_outcome("Update entry", &update);
    println!("{}", e2e.view_entry(id)?);

    // Refused while the entry is still live.
    let early_delete = e2e.ledger.send_one(e2e.journal.delete_journal());
    log_outcome("Delete journal early", &early_delete);

    log_divider();
    println!("{}", e2e.view_journal()?);
    log_divider();

    let cleanup = e2e
        .ledger
        .send(&[e2e.journal.delete_entry(id)?, e2e.journal.delete_journal()]);
    log_outcome("Delete entry and journal", &cleanup);
    print_kv!("Owner balance", e2e.ledger.balance(&owner), LogColor::Info);

    Ok(())
}
