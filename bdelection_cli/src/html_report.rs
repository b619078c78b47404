//! Static HTML report.
//!
//! Produces one self-contained page with embedded CSS and JavaScript. The
//! inline script filters the seat table and replays the vote-shift
//! simulation in the browser with the same arithmetic as
//! `bdelection_lib::simulation`.

use bdelection_lib::simulation::{DEFAULT_PERCENTAGE, MAX_PERCENTAGE, MIN_PERCENTAGE};
use bdelection_lib::{CombinedSeat, ReportStats, Side};

use crate::output::{format_difference, format_votes};

pub const DEFAULT_TITLE: &str = "Bangladesh 13th Election Result Summary Report 2026";

pub struct ReportOptions {
    pub title: String,
    /// Human-readable generation date shown in the footer.
    pub generated_on: String,
}

/// Render the full report page.
pub fn render_report(stats: &ReportStats, opts: &ReportOptions) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    <div class="container">
        {header}
        <div class="content">
            {simulation}
            {stat_cards}
            {table}
        </div>
        {footer}
    </div>
    <script>{js}</script>
</body>
</html>"#,
        title = html_escape(&opts.title),
        css = inline_css(),
        js = inline_javascript(),
        header = render_header(stats, &opts.title),
        simulation = render_simulation_controls(),
        stat_cards = render_stat_cards(stats),
        table = render_seat_table(stats),
        footer = render_footer(&opts.generated_on),
    )
}

fn render_header(stats: &ReportStats, title: &str) -> String {
    format!(
        r#"<header class="header">
    <h1>{title}</h1>
    <p class="summary">Results for {seats} seats: BNP won {bnp} and the NCP/Jamaat Alliance won {alliance}.</p>
</header>"#,
        title = html_escape(title),
        seats = stats.seat_count(),
        bnp = stats.bnp_wins,
        alliance = stats.alliance_wins,
    )
}

fn render_simulation_controls() -> String {
    format!(
        r#"<section class="simulation-section">
    <h2>Vote Shift Simulation</h2>
    <p class="simulation-description">
        Move a share of each seat's two-party vote from BNP to the NCP/Jamaat Alliance
        (negative values move it the other way) and see how the seat count changes.
    </p>
    <div class="simulation-controls">
        <div class="control-group">
            <label for="percentageInput">Vote shift:</label>
            <div class="percentage-input-group">
                <button type="button" class="btn-adjust" onclick="decrementPercentage()">&minus;</button>
                <input type="number" id="percentageInput" class="percentage-input"
                       value="{default}" min="{min}" max="{max}" step="1"
                       onkeydown="handleEnterKey(event)">
                <button type="button" class="btn-adjust" onclick="incrementPercentage()">+</button>
                <span class="percent-sign">%</span>
            </div>
        </div>
        <div class="button-group">
            <button type="button" class="btn-submit" onclick="applySimulation()">Apply Simulation</button>
            <button type="button" class="btn-reset" onclick="resetSimulation()">Reset to Original</button>
        </div>
        <div class="simulation-info-box" id="simulationInfoBox">
            <strong>Simulation applied.</strong>
            Shifted <span id="infoPercentage">{default}</span>% of the vote
            <span id="infoDirection">to the NCP/Jamaat Alliance</span>.
            Seat counts and the table below reflect the shifted votes.
        </div>
    </div>
</section>"#,
        default = DEFAULT_PERCENTAGE,
        min = MIN_PERCENTAGE,
        max = MAX_PERCENTAGE,
    )
}

fn render_stat_cards(stats: &ReportStats) -> String {
    format!(
        r#"<div class="stats-grid">
    <div class="stat-card bnp" id="bnpStatCard">
        <img src="bnp_logo.jpg" alt="" class="logo-party" onerror="this.remove()">
        <div class="stat-info">
            <div class="stat-label">BNP</div>
            <div class="stat-number" id="bnpSeatsWon">{bnp_wins}</div>
            <div class="stat-label">Seats Won</div>
            <div class="stat-votes">Total Votes: <span id="bnpTotalVotes">{bnp_votes}</span></div>
        </div>
    </div>
    <div class="stat-card alliance" id="allianceStatCard">
        <img src="alliance_logo.jpg" alt="" class="logo-party" onerror="this.remove()">
        <div class="stat-info">
            <div class="stat-label">NCP/Jamaat Alliance</div>
            <div class="stat-number" id="allianceSeatsWon">{alliance_wins}</div>
            <div class="stat-label">Seats Won</div>
            <div class="stat-votes">Total Votes: <span id="allianceTotalVotes">{alliance_votes}</span></div>
        </div>
    </div>
</div>"#,
        bnp_wins = stats.bnp_wins,
        alliance_wins = stats.alliance_wins,
        bnp_votes = format_votes(stats.bnp_total_votes),
        alliance_votes = format_votes(stats.alliance_total_votes),
    )
}

fn render_seat_table(stats: &ReportStats) -> String {
    let rows: String = stats.combined_seats.iter().map(render_seat_row).collect();
    let division_options: String = stats
        .divisions()
        .iter()
        .map(|d| {
            let d = html_escape(d);
            format!(r#"<option value="{d}">{d}</option>"#, d = d)
        })
        .collect();

    format!(
        r#"<section class="party-section">
    <h2 id="tableHeaderTitle">Vote count of {count} seats</h2>
    <div class="filter-search">
        <input type="text" id="combinedSearch" placeholder="Search by division, district, seat, or candidate..." oninput="filterTable()">
        <select id="combinedDivisionFilter" onchange="filterTable()">
            <option value="">All Divisions</option>
            {division_options}
        </select>
        <select id="combinedWinnerFilter" onchange="filterTable()">
            <option value="">All Results</option>
            <option value="winner">Winners Only</option>
            <option value="non-winner">Non-Winners Only</option>
        </select>
    </div>
    <div class="table-container">
        <table id="combinedTable">
            <thead>
                <tr>
                    <th>Division</th>
                    <th>District</th>
                    <th>Seat ID</th>
                    <th>Seat Name</th>
                    <th>BNP Candidate</th>
                    <th>BNP Votes</th>
                    <th>Alliance (NCP + Jamaat) Candidate</th>
                    <th>Alliance Votes (NCP + Jamaat)</th>
                    <th>Vote Difference</th>
                    <th>Winner</th>
                </tr>
            </thead>
            <tbody>
                {rows}
            </tbody>
        </table>
        <div class="no-results" id="noResults" hidden>No results found matching your criteria.</div>
    </div>
</section>"#,
        count = stats.seat_count(),
        division_options = division_options,
        rows = rows,
    )
}

fn render_seat_row(seat: &CombinedSeat) -> String {
    let diff = seat.vote_difference();
    format!(
        r#"<tr class="{row_class}" data-division="{division}" data-winner="{winner_flag}" data-bnp-votes="{bnp_raw}" data-alliance-votes="{alliance_raw}" data-seat-id="{seat_id}">
    <td>{division}</td>
    <td>{district}</td>
    <td>{seat_id}</td>
    <td>{seat_name}</td>
    <td><div class="candidate-name-block {bnp_highlight}" data-party="bnp"><h4>{bnp_candidate}</h4><div class="party-label">BNP</div></div></td>
    <td class="votes bnp-votes">{bnp_votes}</td>
    <td><div class="candidate-name-block {alliance_highlight}" data-party="alliance"><h4>{alliance_candidate}</h4><div class="party-label">NCP/Jamaat Alliance</div></div></td>
    <td class="votes alliance-votes">{alliance_votes}</td>
    <td class="vote-difference {diff_class}">{diff}</td>
    <td class="winner-column {winner_cell_class}">{winner_cell}</td>
</tr>"#,
        row_class = if seat.winner.is_some() { "winner-row" } else { "" },
        division = html_escape(&seat.division),
        district = html_escape(&seat.district),
        seat_id = html_escape(&seat.seat_id),
        seat_name = html_escape(&seat.seat_name),
        winner_flag = if seat.winner.is_some() { "winner" } else { "non-winner" },
        bnp_raw = seat.bnp_votes,
        alliance_raw = seat.alliance_votes,
        bnp_highlight = if seat.winner == Some(Side::Bnp) { "winner-highlighted" } else { "" },
        alliance_highlight = if seat.winner == Some(Side::Alliance) { "winner-highlighted" } else { "" },
        bnp_candidate = html_escape(&seat.bnp_candidate),
        alliance_candidate = html_escape(&seat.alliance_candidate),
        bnp_votes = format_votes(seat.bnp_votes),
        alliance_votes = format_votes(seat.alliance_votes),
        diff_class = if diff > 0 { "positive" } else { "negative" },
        diff = format_difference(diff),
        winner_cell_class = if seat.winner.is_some() { "winner-cell" } else { "" },
        winner_cell = winner_badge(seat.winner),
    )
}

fn winner_badge(winner: Option<Side>) -> String {
    match winner {
        Some(side) => format!(
            r#"<span class="winner-badge-inline">{}</span>"#,
            side.short_name()
        ),
        None => "-".to_string(),
    }
}

fn render_footer(generated_on: &str) -> String {
    format!(
        r#"<footer class="footer">
    <div class="footer-title">Bangladesh 13th National Election - 2026</div>
    <div class="footer-date">Generated on {date}</div>
</footer>"#,
        date = html_escape(generated_on),
    )
}

fn inline_css() -> &'static str {
    r#"
* {
    margin: 0;
    padding: 0;
    box-sizing: border-box;
}

body {
    font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
    background: linear-gradient(135deg, #f5f7fa 0%, #c3cfe2 100%);
    line-height: 1.6;
    color: #1f2937;
    padding: 20px;
}

.container {
    max-width: 1500px;
    margin: 0 auto;
    background: #ffffff;
    border-radius: 16px;
    box-shadow: 0 20px 60px rgba(0, 0, 0, 0.15);
    overflow: hidden;
}

.header {
    background: linear-gradient(135deg, #006a4e 0%, #004d38 100%);
    color: #ffffff;
    padding: 40px;
    text-align: center;
}

.header h1 {
    font-size: 2.2em;
    margin-bottom: 10px;
}

.header .summary {
    font-size: 1.15em;
    opacity: 0.95;
}

.content {
    padding: 30px;
}

.simulation-section {
    background: #f8fafc;
    border: 1px solid #e2e8f0;
    border-radius: 12px;
    padding: 24px;
    margin-bottom: 30px;
}

.simulation-section h2 {
    margin-bottom: 8px;
    color: #004d38;
}

.simulation-description {
    color: #475569;
    margin-bottom: 16px;
}

.simulation-controls {
    display: flex;
    flex-wrap: wrap;
    align-items: center;
    gap: 20px;
}

.control-group label {
    font-weight: 600;
    margin-right: 10px;
}

.percentage-input-group {
    display: inline-flex;
    align-items: center;
    gap: 6px;
}

.percentage-input {
    width: 80px;
    padding: 8px;
    font-size: 1.1em;
    text-align: center;
    border: 2px solid #cbd5e1;
    border-radius: 8px;
}

.btn-adjust,
.btn-submit,
.btn-reset {
    border: none;
    border-radius: 8px;
    cursor: pointer;
    font-size: 1em;
    padding: 8px 16px;
}

.btn-adjust {
    background: #e2e8f0;
    font-weight: 700;
}

.btn-submit {
    background: #006a4e;
    color: #ffffff;
}

.btn-reset {
    background: #64748b;
    color: #ffffff;
}

.button-group {
    display: flex;
    gap: 10px;
}

.simulation-info-box {
    display: none;
    width: 100%;
    background: #ecfdf5;
    border-left: 4px solid #10b981;
    border-radius: 8px;
    padding: 12px 16px;
}

.simulation-info-box.show {
    display: block;
}

.stats-grid {
    display: grid;
    grid-template-columns: repeat(auto-fit, minmax(300px, 1fr));
    gap: 24px;
    margin-bottom: 30px;
}

.stat-card {
    display: flex;
    align-items: center;
    gap: 20px;
    border-radius: 12px;
    padding: 24px;
    color: #ffffff;
    transition: transform 0.2s, box-shadow 0.2s;
}

.stat-card.bnp {
    background: linear-gradient(135deg, #1e40af 0%, #1e3a8a 100%);
}

.stat-card.alliance {
    background: linear-gradient(135deg, #047857 0%, #065f46 100%);
}

.stat-card.winner-highlight {
    box-shadow: 0 0 0 4px #facc15, 0 12px 30px rgba(0, 0, 0, 0.2);
    transform: scale(1.02);
}

.stat-card.loser-highlight {
    opacity: 0.75;
}

.logo-party {
    width: 80px;
    height: 80px;
    border-radius: 50%;
    background: #ffffff;
    object-fit: contain;
}

.stat-number {
    font-size: 3em;
    font-weight: 700;
    line-height: 1.1;
}

.stat-label {
    font-size: 1.1em;
    font-weight: 600;
}

.stat-votes {
    margin-top: 12px;
    font-size: 1.05em;
}

.party-section h2 {
    margin-bottom: 16px;
    color: #004d38;
}

.filter-search {
    display: flex;
    flex-wrap: wrap;
    gap: 12px;
    margin-bottom: 16px;
}

.filter-search input,
.filter-search select {
    padding: 10px 14px;
    border: 2px solid #cbd5e1;
    border-radius: 8px;
    font-size: 1em;
}

.filter-search input {
    flex: 1;
    min-width: 260px;
}

.table-container {
    overflow-x: auto;
}

table {
    width: 100%;
    border-collapse: collapse;
    font-size: 0.95em;
}

th {
    background: #004d38;
    color: #ffffff;
    padding: 12px;
    text-align: left;
    position: sticky;
    top: 0;
}

td {
    padding: 10px 12px;
    border-bottom: 1px solid #e2e8f0;
    vertical-align: middle;
}

tbody tr:hover {
    background: #f1f5f9;
}

.winner-row {
    background: #f0fdf4;
}

.candidate-name-block h4 {
    font-size: 1em;
    font-weight: 600;
}

.candidate-name-block .party-label {
    font-size: 0.8em;
    color: #64748b;
}

.candidate-name-block.winner-highlighted h4 {
    color: #047857;
}

.candidate-name-block.winner-highlighted .party-label {
    color: #047857;
    font-weight: 700;
}

.votes {
    font-variant-numeric: tabular-nums;
    font-weight: 600;
}

.vote-difference {
    font-weight: 700;
    font-variant-numeric: tabular-nums;
}

.vote-difference.positive {
    color: #1e40af;
}

.vote-difference.negative {
    color: #047857;
}

.winner-cell {
    font-weight: 700;
}

.winner-badge-inline {
    display: inline-block;
    background: #10b981;
    color: #ffffff;
    border-radius: 999px;
    padding: 2px 10px;
    font-size: 0.85em;
    white-space: nowrap;
}

.no-results {
    text-align: center;
    padding: 30px;
    color: #64748b;
    font-style: italic;
}

.footer {
    background: #0f172a;
    color: #cbd5e1;
    text-align: center;
    padding: 24px;
}

.footer-title {
    font-weight: 600;
    font-size: 1.1em;
}

.footer-date {
    margin-top: 6px;
    font-size: 0.9em;
}

@media print {
    .simulation-section,
    .filter-search {
        display: none;
    }
}
"#
}

fn inline_javascript() -> &'static str {
    r#"
const MIN_PCT = -50;
const MAX_PCT = 50;
const DEFAULT_PCT = 10;
const LABELS = { bnp: 'BNP', alliance: 'NCP/Jamaat Alliance' };

function fmt(n) {
    return n.toLocaleString('en-US');
}

function seatRows() {
    return Array.from(document.querySelectorAll('#combinedTable tbody tr'));
}

function filterTable() {
    const search = document.getElementById('combinedSearch').value.toLowerCase();
    const division = document.getElementById('combinedDivisionFilter').value.toLowerCase();
    const winner = document.getElementById('combinedWinnerFilter').value;
    let visible = 0;

    seatRows().forEach(row => {
        const matchesSearch = row.textContent.toLowerCase().includes(search);
        const matchesDivision = !division || row.dataset.division.toLowerCase() === division;
        const matchesWinner = !winner || row.dataset.winner === winner;
        const show = matchesSearch && matchesDivision && matchesWinner;
        row.style.display = show ? '' : 'none';
        if (show) {
            visible++;
        }
    });

    document.getElementById('noResults').hidden = visible !== 0;
}

function readPercentage() {
    const value = parseFloat(document.getElementById('percentageInput').value) || 0;
    return Math.min(MAX_PCT, Math.max(MIN_PCT, value));
}

function incrementPercentage() {
    const input = document.getElementById('percentageInput');
    input.value = Math.min(MAX_PCT, (parseFloat(input.value) || 0) + 1);
}

function decrementPercentage() {
    const input = document.getElementById('percentageInput');
    input.value = Math.max(MIN_PCT, (parseFloat(input.value) || 0) - 1);
}

function handleEnterKey(event) {
    if (event.key === 'Enter') {
        event.preventDefault();
        applySimulation();
    }
}

function renderRow(row, bnp, alliance, winner) {
    row.querySelector('.bnp-votes').textContent = fmt(bnp);
    row.querySelector('.alliance-votes').textContent = fmt(alliance);

    const diff = bnp - alliance;
    const diffCell = row.querySelector('.vote-difference');
    diffCell.textContent = (diff > 0 ? '+' : '') + fmt(diff);
    diffCell.className = 'vote-difference ' + (diff > 0 ? 'positive' : 'negative');

    row.querySelectorAll('.candidate-name-block').forEach(block => {
        block.classList.toggle('winner-highlighted', block.dataset.party === winner);
    });

    const winnerCell = row.querySelector('.winner-column');
    if (winner) {
        winnerCell.innerHTML = '<span class="winner-badge-inline">' + LABELS[winner] + '</span>';
        winnerCell.className = 'winner-column winner-cell';
    } else {
        winnerCell.textContent = '-';
        winnerCell.className = 'winner-column';
    }

    row.classList.toggle('winner-row', Boolean(winner));
    row.dataset.winner = winner ? 'winner' : 'non-winner';
}

function renderTotals(bnpWins, allianceWins, bnpVotes, allianceVotes, markLoser) {
    document.getElementById('bnpSeatsWon').textContent = bnpWins;
    document.getElementById('allianceSeatsWon').textContent = allianceWins;
    document.getElementById('bnpTotalVotes').textContent = fmt(bnpVotes);
    document.getElementById('allianceTotalVotes').textContent = fmt(allianceVotes);

    const bnpCard = document.getElementById('bnpStatCard');
    const allianceCard = document.getElementById('allianceStatCard');
    bnpCard.classList.remove('winner-highlight', 'loser-highlight');
    allianceCard.classList.remove('winner-highlight', 'loser-highlight');
    if (bnpWins > allianceWins) {
        bnpCard.classList.add('winner-highlight');
        if (markLoser) allianceCard.classList.add('loser-highlight');
    } else if (allianceWins > bnpWins) {
        allianceCard.classList.add('winner-highlight');
        if (markLoser) bnpCard.classList.add('loser-highlight');
    }
}

function applySimulation() {
    const pct = readPercentage();
    document.getElementById('percentageInput').value = pct;
    let bnpWins = 0, allianceWins = 0, bnpVotes = 0, allianceVotes = 0;

    seatRows().forEach(row => {
        const bnp = parseInt(row.dataset.bnpVotes, 10);
        const alliance = parseInt(row.dataset.allianceVotes, 10);
        const change = Math.round((bnp + alliance) * pct / 100);
        const newBnp = Math.max(0, bnp - change);
        const newAlliance = Math.max(0, alliance + change);

        let winner = '';
        if (newBnp > newAlliance) {
            winner = 'bnp';
            bnpWins++;
        } else if (newAlliance > newBnp) {
            winner = 'alliance';
            allianceWins++;
        }
        renderRow(row, newBnp, newAlliance, winner);
        bnpVotes += newBnp;
        allianceVotes += newAlliance;
    });

    renderTotals(bnpWins, allianceWins, bnpVotes, allianceVotes, true);
    document.getElementById('tableHeaderTitle').textContent =
        'Simulation applied: vote count of ' + seatRows().length + ' seats';
    document.getElementById('infoPercentage').textContent = Math.abs(pct);
    document.getElementById('infoDirection').textContent =
        pct < 0 ? 'to BNP' : 'to the NCP/Jamaat Alliance';
    document.getElementById('simulationInfoBox').classList.add('show');
    filterTable();
}

function resetSimulation() {
    document.getElementById('percentageInput').value = DEFAULT_PCT;
    let bnpWins = 0, allianceWins = 0, bnpVotes = 0, allianceVotes = 0;

    seatRows().forEach(row => {
        const bnp = parseInt(row.dataset.bnpVotes, 10);
        const alliance = parseInt(row.dataset.allianceVotes, 10);
        let winner = '';
        if (bnp > alliance) {
            winner = 'bnp';
            bnpWins++;
        } else if (alliance > bnp) {
            winner = 'alliance';
            allianceWins++;
        }
        renderRow(row, bnp, alliance, winner);
        bnpVotes += bnp;
        allianceVotes += alliance;
    });

    renderTotals(bnpWins, allianceWins, bnpVotes, allianceVotes, false);
    document.getElementById('tableHeaderTitle').textContent =
        'Vote count of ' + seatRows().length + ' seats';
    document.getElementById('simulationInfoBox').classList.remove('show');
    filterTable();
}
"#
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(division: &str, name: &str, bnp: u64, alliance: u64, winner: Option<Side>) -> CombinedSeat {
        CombinedSeat {
            division: division.into(),
            district: division.into(),
            seat_id: "1".into(),
            seat_name: name.into(),
            bnp_candidate: "Salman Rahman".into(),
            bnp_votes: bnp,
            alliance_candidate: "Abdul Karim".into(),
            alliance_votes: alliance,
            winner,
        }
    }

    fn sample_stats() -> ReportStats {
        ReportStats {
            combined_seats: vec![
                seat("Dhaka", "Dhaka-1", 120_450, 102_123, Some(Side::Bnp)),
                seat("Barisal", "Bhola-1", 100, 100, None),
            ],
            bnp_wins: 1,
            alliance_wins: 0,
            bnp_total_votes: 120_550,
            alliance_total_votes: 102_223,
        }
    }

    fn opts() -> ReportOptions {
        ReportOptions {
            title: DEFAULT_TITLE.to_string(),
            generated_on: "February 13, 2026".to_string(),
        }
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_report_is_self_contained() {
        let html = render_report(&sample_stats(), &opts());
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<style>"));
        assert!(html.contains("function applySimulation()"));
        assert!(html.contains("function resetSimulation()"));
        assert!(html.contains("function filterTable()"));
        assert!(!html.contains("<script src="));
        assert!(!html.contains("<link "));
    }

    #[test]
    fn test_summary_and_cards() {
        let html = render_report(&sample_stats(), &opts());
        assert!(html.contains("Results for 2 seats: BNP won 1 and the NCP/Jamaat Alliance won 0."));
        assert!(html.contains(r#"<span id="bnpTotalVotes">120,550</span>"#));
        assert!(html.contains(r#"<span id="allianceTotalVotes">102,223</span>"#));
        assert!(html.contains(r#"<div class="stat-card bnp" id="bnpStatCard">"#));
        assert!(html.contains(r#"<div class="stat-card alliance" id="allianceStatCard">"#));
        assert!(!html.contains(r#"stat-card bnp winner-highlight"#));
        assert!(html.contains("Generated on February 13, 2026"));
    }

    #[test]
    fn test_row_data_attributes() {
        let html = render_report(&sample_stats(), &opts());
        assert!(html.contains(r#"data-division="Dhaka" data-winner="winner" data-bnp-votes="120450" data-alliance-votes="102123" data-seat-id="1""#));
        assert!(html.contains(r#"data-division="Barisal" data-winner="non-winner" data-bnp-votes"#));
        assert!(!html.contains("data-original-winner"));
        assert!(html.contains(r#"<td class="vote-difference positive">+18,327</td>"#));
        assert!(html.contains(r#"<td class="vote-difference negative">0</td>"#));
        assert!(html.contains(r#"<span class="winner-badge-inline">BNP</span>"#));
    }

    #[test]
    fn test_division_filter_sorted() {
        let html = render_report(&sample_stats(), &opts());
        let barisal = html.find(r#"<option value="Barisal">"#).unwrap();
        let dhaka = html.find(r#"<option value="Dhaka">"#).unwrap();
        assert!(barisal < dhaka);
    }

    #[test]
    fn test_reset_recomputes_winners_from_votes() {
        let html = render_report(&sample_stats(), &opts());
        let reset = &html[html.find("function resetSimulation()").unwrap()..];
        assert!(reset.contains("if (bnp > alliance)"));
        assert!(reset.contains("renderTotals(bnpWins, allianceWins, bnpVotes, allianceVotes, false)"));
        assert!(html.contains("renderTotals(bnpWins, allianceWins, bnpVotes, allianceVotes, true)"));
    }

    #[test]
    fn test_simulation_defaults() {
        let html = render_report(&sample_stats(), &opts());
        assert!(html.contains(r#"value="10" min="-50" max="50" step="1""#));
    }

    #[test]
    fn test_dynamic_text_is_escaped() {
        let mut stats = sample_stats();
        stats.combined_seats[0].bnp_candidate = "<script>alert(1)</script>".into();
        stats.combined_seats[0].division = "Dhaka \"North\"".into();
        let html = render_report(&stats, &opts());
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains(r#"data-division="Dhaka &quot;North&quot;""#));
    }

    #[test]
    fn test_empty_report() {
        let html = render_report(&ReportStats::default(), &opts());
        assert!(html.contains("Vote count of 0 seats"));
        assert!(html.contains("No results found matching your criteria."));
        assert!(html.contains(r#"class="stat-card bnp""#));
    }
}
