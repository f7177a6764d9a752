use crate::core::context::BoardContext;
use crate::core::error::BoardResult;
use crate::release::query::summarize;
use crate::session::ReleaseSession;
use chrono::Utc;

/// Print release counts and the highest version
pub fn run_summary(ctx: &BoardContext, json: bool) -> BoardResult<()> {
  let mut session = ReleaseSession::new(ctx.open_store()?);
  session.load();

  let summary = summarize(session.releases(), Utc::now());

  if json {
    println!("{}", serde_json::to_string_pretty(&summary)?);
    return Ok(());
  }

  println!("📦 Releases: {}", summary.total);
  println!("   ✅ Released: {}", summary.released);
  println!("   ⏳ Pending:  {}", summary.pending);
  println!("   📅 Upcoming: {}", summary.upcoming);
  if let Some(version) = &summary.latest_version {
    println!("   Latest version: {}", version);
  }
  if let Some(date) = &summary.next_go_live {
    println!("   Next go-live:   {}", date);
  }
  Ok(())
}
