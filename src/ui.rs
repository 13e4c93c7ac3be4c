use crate::models::{DashboardView, DatasetVariant, Grade, PieSlice};
use crate::palette;
use crate::report::{ReportForm, Status};
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Home,
    Report,
    Law,
    Data,
    Privacy,
    Thanks,
}

const NAV_ITEMS: [(Page, &str, &str); 4] = [
    (Page::Home, "/", "Home"),
    (Page::Report, "/report", "Report"),
    (Page::Law, "/law", "California Law"),
    (Page::Data, "/data", "Data"),
];

pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_page(title: &str, active: Page, main: &str, scripts: &str) -> String {
    let mut nav = String::new();
    for (page, href, label) in NAV_ITEMS {
        let class = if page == active { "nav-link active" } else { "nav-link" };
        let _ = write!(nav, r#"<a class="{class}" href="{href}">{label}</a>"#);
    }

    LAYOUT_HTML
        .replace("{{TITLE}}", title)
        .replace("{{NAV}}", &nav)
        .replace("{{MAIN}}", main)
        .replace("{{SCRIPTS}}", scripts)
}

pub fn render_home() -> String {
    render_page("SLAP", Page::Home, HOME_HTML, "")
}

pub fn render_law() -> String {
    render_page("California Menstrual Equity Act", Page::Law, LAW_HTML, "")
}

pub fn render_privacy() -> String {
    render_page("Privacy Policy", Page::Privacy, PRIVACY_HTML, "")
}

pub fn render_thanks() -> String {
    render_page("Thank you", Page::Thanks, THANKS_HTML, CONFETTI_SCRIPT)
}

pub fn render_report(form: &ReportForm) -> String {
    let fields = &form.fields;

    let mut grades = String::new();
    for grade in Grade::ALL {
        let selected = if grade == fields.grade { " selected" } else { "" };
        let _ = write!(
            grades,
            r#"<option value="{}"{selected}>{}</option>"#,
            grade.value(),
            grade.label()
        );
    }

    let status = match &form.status {
        None => String::new(),
        Some(Status::Success(message)) => format!(
            r#"<div class="status success" role="status">{} <a href="/thanks">Continue</a></div>"#,
            html_escape(message)
        ),
        Some(Status::Error(message)) => format!(
            r#"<div class="status error" role="alert">{}</div>"#,
            html_escape(message)
        ),
    };

    let main = REPORT_HTML
        .replace("{{STATUS}}", &status)
        .replace("{{GRADES}}", &grades)
        .replace("{{SCHOOL}}", &html_escape(&fields.school))
        .replace("{{EMAIL}}", &html_escape(&fields.principal_email))
        .replace("{{NAME}}", &html_escape(&fields.your_name))
        .replace("{{ANON_CHECKED}}", if fields.anonymous { " checked" } else { "" })
        .replace("{{NAME_HIDDEN}}", if fields.anonymous { " hidden" } else { "" });

    render_page("Report a Violation", Page::Report, &main, REPORT_SCRIPT)
}

fn dashboard_href(variant: DatasetVariant, weekly: bool, heatmap: bool, date: &str) -> String {
    let variant = match variant {
        DatasetVariant::Counts => "counts",
        DatasetVariant::Percentages => "percentages",
    };
    format!("/data?variant={variant}&amp;weekly={weekly}&amp;heatmap={heatmap}&amp;date={date}")
}

fn toggle(label: &str, href: &str, active: bool) -> String {
    let class = if active { "toggle active" } else { "toggle" };
    format!(r#"<a class="{class}" href="{href}">{label}</a>"#)
}

pub fn render_dashboard(view: &DashboardView) -> String {
    let selected = view.selected.as_str();

    let mut toggles = String::new();
    for (label, variant) in [("Counts", DatasetVariant::Counts), ("Percentages", DatasetVariant::Percentages)] {
        let href = dashboard_href(variant, view.weekly, view.heatmap, selected);
        toggles.push_str(&toggle(label, &href, view.variant == variant));
    }
    for (label, weekly) in [("Daily", false), ("Weekly", true)] {
        let href = dashboard_href(view.variant, weekly, view.heatmap, selected);
        toggles.push_str(&toggle(label, &href, view.weekly == weekly));
    }
    let heat_href = dashboard_href(view.variant, view.weekly, !view.heatmap, selected);
    toggles.push_str(&toggle("Heatmap mode", &heat_href, view.heatmap));

    let mut grid = String::new();
    for cell in &view.cells {
        let class = if cell.selected { "cell selected" } else { "cell" };
        let href = dashboard_href(view.variant, view.weekly, view.heatmap, &cell.key);
        let _ = write!(
            grid,
            r#"<a class="{class}" href="{href}" style="background: {color}" title="{label}"><span>{label}</span></a>"#,
            color = cell.color,
            label = html_escape(&cell.label),
        );
    }

    let mut legend = String::new();
    let legend_items: &[(&str, &str)] = match view.variant {
        DatasetVariant::Counts => &[("Yes", palette::YES), ("No", palette::NO), ("Both", palette::BOTH)],
        DatasetVariant::Percentages => &[
            ("Yes", palette::YES),
            ("No", palette::NO),
            ("Both", palette::BOTH),
            ("Not reported", palette::NOT_REPORTED),
        ],
    };
    for (label, color) in legend_items {
        let _ = write!(legend, r#"<span class="swatch" style="background: {color}"></span><span>{label}</span>"#);
    }

    let mut breakdown = String::new();
    for slice in &view.detail.slices {
        let _ = write!(
            breakdown,
            r#"<div class="pct">{}: <strong style="color: {}">{}%</strong></div>"#,
            slice.label, slice.color, slice.percent
        );
    }

    let main = DATA_HTML
        .replace("{{TOGGLES}}", &toggles)
        .replace("{{GRID}}", &grid)
        .replace("{{LEGEND}}", &legend)
        .replace("{{DETAIL_TITLE}}", &html_escape(&view.detail.title))
        .replace("{{PIE}}", &render_pie(&view.detail.slices))
        .replace("{{BREAKDOWN}}", &breakdown)
        .replace("{{NOTE}}", &html_escape(&view.detail.reporting_note));

    render_page("Data Dashboard", Page::Data, &main, "")
}

pub fn render_pie(slices: &[PieSlice]) -> String {
    const SIZE: f64 = 220.0;
    const RADIUS: f64 = 60.0;
    const THICKNESS: f64 = 40.0;
    let center = SIZE / 2.0;

    let visible: Vec<&PieSlice> = slices.iter().filter(|s| s.percent > 0).collect();
    let mut svg = format!(r#"<svg class="pie" viewBox="0 0 {SIZE} {SIZE}" role="img">"#);

    match visible.as_slice() {
        [] => {
            let _ = write!(
                svg,
                r##"<circle cx="{center}" cy="{center}" r="{RADIUS}" fill="none" stroke="#e5e7eb" stroke-width="{THICKNESS}"/>"##
            );
        }
        [only] => {
            let _ = write!(
                svg,
                r#"<circle cx="{center}" cy="{center}" r="{RADIUS}" fill="none" stroke="{}" stroke-width="{THICKNESS}"><title>{}: {}%</title></circle>"#,
                only.color, only.label, only.percent
            );
        }
        many => {
            let mut start_angle = -90.0_f64;
            for slice in many {
                let angle = f64::from(slice.percent) / 100.0 * 360.0;
                let end_angle = start_angle + angle;
                let (x1, y1) = polar(center, RADIUS, start_angle);
                let (x2, y2) = polar(center, RADIUS, end_angle);
                let large_arc = if angle > 180.0 { 1 } else { 0 };
                let _ = write!(
                    svg,
                    r#"<path d="M {x1:.2} {y1:.2} A {RADIUS} {RADIUS} 0 {large_arc} 1 {x2:.2} {y2:.2}" fill="none" stroke="{}" stroke-width="{THICKNESS}"><title>{}: {}%</title></path>"#,
                    slice.color, slice.label, slice.percent
                );
                start_angle = end_angle;
            }
        }
    }

    svg.push_str("</svg>");
    svg
}

fn polar(center: f64, radius: f64, degrees: f64) -> (f64, f64) {
    let rad = degrees.to_radians();
    (center + radius * rad.cos(), center + radius * rad.sin())
}

const LAYOUT_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>{{TITLE}} | Student Legislative Accountability Project</title>
  <style>
    :root {
      --primary: #dc2626;
      --primary-ink: #ffffff;
      --ink: #18181b;
      --muted: #f4f4f5;
      --soft: rgba(24, 24, 27, 0.72);
      --border: #e4e4e7;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      color: var(--ink);
      font-family: "Inter", "Segoe UI", sans-serif;
      background: #ffffff;
    }

    a {
      color: inherit;
    }

    .container {
      width: min(1120px, 100%);
      margin: 0 auto;
      padding: 0 20px;
    }

    header.site {
      position: sticky;
      top: 0;
      z-index: 50;
      border-bottom: 1px solid var(--border);
      background: rgba(255, 255, 255, 0.85);
      backdrop-filter: blur(8px);
    }

    header.site .container {
      display: flex;
      align-items: center;
      justify-content: space-between;
      height: 64px;
      gap: 12px;
    }

    .brand {
      display: flex;
      align-items: center;
      gap: 8px;
      font-weight: 700;
      text-decoration: none;
    }

    .brand .mark {
      display: inline-flex;
      width: 32px;
      height: 32px;
      align-items: center;
      justify-content: center;
      border-radius: 6px;
      background: var(--primary);
      color: var(--primary-ink);
      font-weight: 800;
    }

    nav.main {
      display: flex;
      flex-wrap: wrap;
      gap: 4px;
    }

    .nav-link {
      padding: 8px 12px;
      border-radius: 6px;
      font-size: 0.9rem;
      font-weight: 500;
      text-decoration: none;
      color: var(--soft);
    }

    .nav-link.active {
      background: var(--primary);
      color: var(--primary-ink);
    }

    .pill {
      display: inline-flex;
      border-radius: 999px;
      background: var(--primary);
      color: var(--primary-ink);
      padding: 10px 20px;
      font-weight: 600;
      text-decoration: none;
      border: none;
      cursor: pointer;
      font-size: 0.95rem;
    }

    .pill.ghost {
      background: transparent;
      border: 1px solid rgba(255, 255, 255, 0.3);
    }

    .pill.light {
      background: #ffffff;
      color: var(--ink);
    }

    .pill:disabled {
      opacity: 0.6;
      cursor: progress;
    }

    main {
      min-height: 60vh;
    }

    section.block {
      padding: 56px 0;
    }

    h1 {
      font-size: clamp(1.9rem, 4vw, 3rem);
      font-weight: 800;
      letter-spacing: -0.02em;
      margin: 0;
    }

    .lead {
      color: var(--soft);
      line-height: 1.6;
      max-width: 46rem;
    }

    .hero {
      background: linear-gradient(135deg, #000000, #18181b 60%, #000000);
      color: #ffffff;
      text-align: center;
      padding: 88px 0;
    }

    .hero .tag {
      display: inline-block;
      border: 1px solid rgba(255, 255, 255, 0.15);
      border-radius: 999px;
      padding: 4px 12px;
      font-size: 0.75rem;
      font-weight: 600;
    }

    .hero .lead {
      color: rgba(255, 255, 255, 0.8);
      margin: 16px auto 32px;
    }

    .cards {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 16px;
      padding: 0;
      list-style: none;
    }

    .card {
      border: 1px solid var(--border);
      border-radius: 16px;
      padding: 24px;
      background: #ffffff;
      box-shadow: 0 1px 2px rgba(0, 0, 0, 0.05);
    }

    .step {
      display: inline-flex;
      width: 40px;
      height: 40px;
      align-items: center;
      justify-content: center;
      border-radius: 999px;
      background: var(--primary);
      color: var(--primary-ink);
      font-weight: 800;
    }

    .cta {
      background: var(--primary);
      color: var(--primary-ink);
      text-align: center;
      padding: 56px 0;
    }

    form.report {
      display: grid;
      gap: 16px;
      max-width: 36rem;
      margin-top: 24px;
    }

    form.report label {
      display: grid;
      gap: 6px;
      font-weight: 600;
      font-size: 0.9rem;
    }

    form.report input[type="text"],
    form.report input[type="email"],
    form.report select {
      border: 1px solid var(--border);
      border-radius: 8px;
      padding: 10px 12px;
      font-size: 1rem;
    }

    form.report .check {
      display: flex;
      align-items: center;
      gap: 8px;
    }

    .status {
      border-radius: 8px;
      padding: 12px 16px;
      margin-top: 16px;
      max-width: 36rem;
    }

    .status.success {
      background: #ecfdf5;
      color: #065f46;
    }

    .status.error {
      background: #fef2f2;
      color: #991b1b;
    }

    .dashboard {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(320px, 1fr));
      gap: 24px;
      margin-top: 24px;
    }

    .toggles {
      display: flex;
      flex-wrap: wrap;
      gap: 6px;
    }

    .toggle {
      border: 1px solid var(--border);
      border-radius: 999px;
      padding: 6px 12px;
      font-size: 0.85rem;
      text-decoration: none;
    }

    .toggle.active {
      background: var(--ink);
      color: #ffffff;
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 8px;
      margin-top: 16px;
    }

    .cell {
      aspect-ratio: 1;
      border-radius: 6px;
      display: flex;
      align-items: center;
      justify-content: center;
      color: #ffffff;
      font-size: 0.7rem;
      font-weight: 600;
      text-align: center;
      text-decoration: none;
      transition: transform 150ms ease;
    }

    .cell:hover {
      transform: scale(1.05);
    }

    .cell.selected {
      outline: 4px solid rgba(220, 38, 38, 0.4);
    }

    .legend {
      display: flex;
      align-items: center;
      gap: 8px;
      margin-top: 16px;
      font-size: 0.75rem;
      color: var(--soft);
    }

    .swatch {
      display: inline-block;
      width: 12px;
      height: 12px;
      border-radius: 3px;
    }

    .pie {
      width: 220px;
      height: 220px;
    }

    .summary {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      gap: 24px;
    }

    footer.site {
      margin-top: 64px;
      border-top: 1px solid var(--border);
      background: rgba(244, 244, 245, 0.3);
    }

    footer.site .container {
      display: flex;
      flex-wrap: wrap;
      justify-content: space-between;
      gap: 16px;
      padding-top: 40px;
      padding-bottom: 40px;
      font-size: 0.9rem;
    }

    footer.site nav {
      display: flex;
      gap: 16px;
    }
  </style>
</head>
<body>
  <header class="site">
    <div class="container">
      <a class="brand" href="/"><span class="mark">S</span><span>SLAP</span></a>
      <nav class="main">{{NAV}}</nav>
      <a class="pill" href="/report">File a Report</a>
    </div>
  </header>
  <main>
{{MAIN}}
  </main>
  <footer class="site">
    <div class="container">
      <div>&copy; 2025 SLAP Project</div>
      <nav>
        <a href="/report">Report</a>
        <a href="/law">Law</a>
        <a href="/privacy">Privacy</a>
      </nav>
    </div>
  </footer>
{{SCRIPTS}}
</body>
</html>
"#;

const HOME_HTML: &str = r##"<section class="hero">
  <div class="container">
    <span class="tag">Students &bull; Rights &bull; Action</span>
    <h1>Student Legislative Accountability Project (SLAP)</h1>
    <p class="lead">Holding schools accountable to California&rsquo;s Menstrual Equity Law.</p>
    <a class="pill" href="/report">File a Report</a>
    <a class="pill ghost" href="#how">How it works</a>
  </div>
</section>
<section class="block" id="about">
  <div class="container">
    <h2>About the Project</h2>
    <p class="lead">SLAP is a student-powered initiative to ensure every campus follows California&rsquo;s Menstrual Equity Law. We provide a simple way for students to report missing supplies or policy violations so administrators can act quickly. Together, we make schools more equitable, respectful, and responsive to student needs.</p>
    <p class="lead">Use this site to submit a report in under two minutes. You can choose to remain anonymous or include your name. Your report is sent directly to your school&rsquo;s administration.</p>
    <ul class="cards">
      <li class="card"><strong>Real issues, real impact</strong><p>Reports help administrators identify gaps and respond faster.</p></li>
      <li class="card"><strong>Privacy first</strong><p>You decide what to share and whether to include your name.</p></li>
      <li class="card"><strong>Simple and fast</strong><p>Designed to work on any device in under two minutes.</p></li>
    </ul>
  </div>
</section>
<section class="block" id="how">
  <div class="container">
    <h2>How it Works</h2>
    <ol class="cards">
      <li class="card"><span class="step">1</span><h3>Fill out the report form</h3><p>Tell us what&rsquo;s missing or what happened at your school.</p></li>
      <li class="card"><span class="step">2</span><h3>Choose anonymous or named</h3><p>You control your privacy. Share your name only if you want.</p></li>
      <li class="card"><span class="step">3</span><h3>Email goes to your school admin</h3><p>We route the report to administrators so they can take action.</p></li>
    </ol>
    <a class="pill" href="/report">Report Now</a>
  </div>
</section>
<section class="cta">
  <div class="container">
    <h2>Your voice moves policy</h2>
    <p>When students speak up, schools respond. Submit a report today and help make your campus better for everyone.</p>
    <a class="pill light" href="/report">Start Reporting</a>
  </div>
</section>
<section class="block">
  <div class="container">
    <h3>Contact</h3>
    <p>Email: <a href="mailto:slap.student.project@gmail.com">slap.student.project@gmail.com</a></p>
  </div>
</section>"##;

const LAW_HTML: &str = r#"<section class="block">
  <div class="container">
    <h1>California Menstrual Equity Act (AB 367)</h1>
    <p class="lead">AB 367 requires public schools serving grades 6&ndash;12 to provide free menstrual products in all women&rsquo;s restrooms, at least one men&rsquo;s restroom, and all-gender restrooms. The goal of the law is simple: ensure equitable access to menstrual products so that every student can attend school with dignity and without disruption.</p>
    <h2>Key requirements</h2>
    <ul class="lead">
      <li>Free menstrual products must be readily available to students.</li>
      <li>Products should be stocked in multiple restrooms across campus.</li>
      <li>Schools must maintain a system to replenish products regularly.</li>
      <li>Noncompliance can be reported through programs like SLAP.</li>
    </ul>
    <h2>Why it matters</h2>
    <p class="lead">Lack of access to menstrual products harms attendance, participation, and student dignity. Students who can&rsquo;t get the supplies they need may miss class or avoid activities, which negatively affects learning and wellbeing. Ensuring free, reliable access helps keep students in school and affirms their right to full participation.</p>
    <h2>Resources</h2>
    <p class="lead">Official text of the law:
      <a href="https://leginfo.legislature.ca.gov/faces/billNavClient.xhtml?bill_id=202120220AB367" target="_blank" rel="noreferrer">Read AB 367 (leginfo.ca.gov)</a>
    </p>
    <div class="card">
      <p><strong>Have concerns?</strong></p>
      <p>If your school is not meeting these requirements, you can submit a report through SLAP so administrators can be notified and take action.</p>
      <a class="pill" href="/report">File a Report</a>
    </div>
  </div>
</section>"#;

const PRIVACY_HTML: &str = r#"<section class="block">
  <div class="container">
    <h1>Privacy Policy</h1>
    <p class="lead">SLAP does not store reports. The details you enter are sent once to your principal by email and are not kept on this site. If you choose to report anonymously, your name is never included in the email.</p>
  </div>
</section>"#;

const THANKS_HTML: &str = r#"<section class="block">
  <div class="container">
    <div class="card">
      <h1>Thank you for submitting your report</h1>
      <p class="lead">Your report has been sent to the school's administration. We appreciate you taking action to improve menstrual equity on campus.</p>
      <a class="pill" href="/">Return home</a>
      <a class="toggle" href="/report">File another report</a>
    </div>
  </div>
</section>"#;

const REPORT_HTML: &str = r#"<section class="block">
  <div class="container">
    <h1>Report a Violation</h1>
    <p class="lead">Tell your principal that your school is not providing free menstrual products. Reports go straight to the email address you enter; SLAP keeps no copy.</p>
    {{STATUS}}
    <form class="report" method="post" action="/report" id="report-form">
      <label>Grade
        <select name="grade">{{GRADES}}</select>
      </label>
      <label>School name
        <input type="text" name="school" value="{{SCHOOL}}" required />
      </label>
      <label>Principal email
        <input type="email" name="principal_email" value="{{EMAIL}}" required />
      </label>
      <label class="check">
        <input type="checkbox" name="anonymous" id="anonymous"{{ANON_CHECKED}} /> Submit anonymously
      </label>
      <label id="name-field"{{NAME_HIDDEN}}>Your name (optional)
        <input type="text" name="your_name" value="{{NAME}}" />
      </label>
      <button class="pill" type="submit" id="submit">Send report</button>
    </form>
  </div>
</section>"#;

const REPORT_SCRIPT: &str = r#"<script>
  (() => {
    const form = document.getElementById('report-form');
    const submit = document.getElementById('submit');
    const anonymous = document.getElementById('anonymous');
    const nameField = document.getElementById('name-field');

    anonymous.addEventListener('change', () => {
      nameField.hidden = anonymous.checked;
    });

    form.addEventListener('submit', () => {
      submit.disabled = true;
      submit.textContent = 'Sending...';
    });
  })();
</script>"#;

const CONFETTI_SCRIPT: &str = r#"<script>
  (() => {
    const script = document.createElement('script');
    script.src = 'https://cdn.jsdelivr.net/npm/canvas-confetti@1.5.1/dist/confetti.browser.min.js';
    script.onload = () => {
      try {
        for (let i = 0; i < 6; i++) {
          window.confetti({
            particleCount: 100,
            spread: 60,
            origin: { x: Math.random(), y: Math.random() * 0.4 },
          });
        }
      } catch (e) {
        console.warn('Confetti failed', e);
      }
    };
    script.onerror = () => console.warn('Confetti load failed');
    document.head.appendChild(script);
  })();
</script>"#;

const DATA_HTML: &str = r#"<section class="block">
  <div class="container">
    <h1>Data Dashboard</h1>
    <p class="lead">This dashboard shows how a law meant to guarantee menstrual equity plays out in practice. Each square represents a day of data collection of High Schools across the San Diego school district. Green means products were available, red means they weren&rsquo;t, and yellow means inconsistent.</p>
    <div class="dashboard">
      <div>
        <div class="toggles">{{TOGGLES}}</div>
        <div class="grid">{{GRID}}</div>
        <div class="legend">{{LEGEND}}</div>
      </div>
      <div class="card">
        <h3>{{DETAIL_TITLE}}</h3>
        <div class="summary">
          {{PIE}}
          <div>
            {{BREAKDOWN}}
            <p class="lead">{{NOTE}}</p>
          </div>
        </div>
        <p class="legend">Click dates to explore specific days.</p>
      </div>
    </div>
  </div>
</section>
<section class="block">
  <div class="container">
    <h2>Conclusion</h2>
    <p class="lead">We collected data from every high school in the district through daily student reports. On average, more than half of schools participated each day, and over the course of the study period we captured input from every school at least once. While this dataset is not perfect and reflects the limitations of voluntary reporting, the results show a consistent trend: schools still have significant work to do in meeting the state mandate for menstrual product availability. Patterns also emerged when comparing access across communities, schools with higher proportions of minority students were less likely to report available products, while schools in higher-income areas showed somewhat greater access. These disparities highlight how inequities in implementation persist, even when a policy promises universal access.</p>
  </div>
</section>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::build_dashboard_at;
    use crate::models::Category;
    use crate::report::ReportSubmission;
    use chrono::NaiveDate;

    #[test]
    fn escapes_markup() {
        assert_eq!(html_escape(r#"<b>"A&B's"</b>"#), "&lt;b&gt;&quot;A&amp;B&#x27;s&quot;&lt;/b&gt;");
    }

    #[test]
    fn pages_share_header_and_footer() {
        for page in [render_home(), render_law(), render_privacy(), render_thanks()] {
            assert!(page.contains(r#"href="/data">Data</a>"#));
            assert!(page.contains("&copy; 2025 SLAP Project"));
        }
        assert!(render_law().contains(r#"<a class="nav-link active" href="/law">"#));
        assert!(render_thanks().contains("canvas-confetti"));
    }

    #[test]
    fn report_form_echoes_escaped_fields() {
        let form = ReportForm {
            fields: ReportSubmission {
                grade: Grade::Twelfth,
                school: "<Lincoln>".into(),
                principal_email: "bad".into(),
                anonymous: true,
                your_name: String::new(),
            },
            status: Some(Status::Error("Please enter a valid principal email address.".into())),
            ..ReportForm::default()
        };
        let html = render_report(&form);
        assert!(html.contains(r#"value="&lt;Lincoln&gt;""#));
        assert!(html.contains(r#"<option value="12" selected>"#));
        assert!(html.contains(r#"id="anonymous" checked"#));
        assert!(html.contains(r#"class="status error""#));
    }

    #[test]
    fn dashboard_renders_every_cell() {
        let day = NaiveDate::from_ymd_opt(2023, 10, 21).unwrap();
        let view = build_dashboard_at(DatasetVariant::Counts, day, false, false);
        let html = render_dashboard(&view);
        assert_eq!(html.matches(r#"class="cell"#).count(), 26);
        assert_eq!(html.matches("cell selected").count(), 1);
        assert!(html.contains("Daily summary: Oct 21"));
        assert!(html.contains("14 schools reported on this date."));
    }

    #[test]
    fn pie_draws_full_ring_for_single_slice() {
        let slices = vec![PieSlice {
            category: Category::No,
            label: "No",
            percent: 100,
            color: palette::NO,
        }];
        let svg = render_pie(&slices);
        assert!(svg.contains("<circle"));
        assert!(!svg.contains("<path"));

        let two = vec![
            PieSlice { category: Category::Yes, label: "Yes", percent: 7, color: palette::YES },
            PieSlice { category: Category::No, label: "No", percent: 93, color: palette::NO },
        ];
        assert_eq!(render_pie(&two).matches("<path").count(), 2);
    }
}
