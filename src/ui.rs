use crate::calendar::CalendarCell;
use crate::models::{CalendarResponse, WidgetSnapshot};

pub fn render_index(snapshot: &WidgetSnapshot, calendar: &CalendarResponse) -> String {
    let editor = &snapshot.editor;

    fill_template(
        INDEX_HTML,
        &[
            ("TODAY_LABEL", escape_html(&snapshot.today_label)),
            ("TODAY", escape_html(&snapshot.today)),
            ("YEAR", snapshot.year.to_string()),
            ("DAYS", snapshot.countdown.days.to_string()),
            ("CLOCK", escape_html(&snapshot.countdown.clock)),
            ("GOAL", escape_html(&snapshot.goal)),
            ("QUOTE", escape_html(&snapshot.quote)),
            ("EDITOR_HIDDEN", if editor.open { "" } else { "hidden" }.to_string()),
            ("TARGET_INPUT", escape_html(&editor.target_input)),
            ("START_INPUT", escape_html(&editor.start_input)),
            ("GOAL_INPUT", escape_html(&editor.goal_input)),
            ("CAL_LABEL", escape_html(&calendar.label)),
            ("CAL_YEAR", calendar.year.to_string()),
            ("CAL_MONTH", calendar.month.to_string()),
            ("CAL_ROWS", render_calendar_rows(&calendar.weeks)),
        ],
    )
}

pub fn render_calendar_rows(weeks: &[Vec<CalendarCell>]) -> String {
    let mut html = String::new();
    for week in weeks {
        html.push_str(r#"<div class="cal-week">"#);
        for cell in week {
            let label = cell.day.map(|day| day.to_string()).unwrap_or_default();
            html.push_str(&format!(
                r#"<span class="cal-day {}">{}</span>"#,
                cell.status.as_str(),
                label
            ));
        }
        html.push_str("</div>");
    }
    html
}

/// Substitutes `{{KEY}}` markers in one pass, so substituted text is never
/// scanned for markers again.
fn fill_template(template: &str, values: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match values.iter().find(|(name, _)| *name == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(key);
                        out.push_str("}}");
                    }
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }

    out.push_str(rest);
    out
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Lock-in</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Inter:wght@300;400;600;800&family=Space+Grotesk:wght@400;600;700&family=DM+Serif+Display&display=swap');

    :root {
      --bg: #171717;
      --ink: #f5f5f5;
      --muted: #a3a3a3;
      --line: #404040;
      --accent: #4f46e5;
      --today: #22c55e;
      --card: linear-gradient(180deg, rgba(255, 255, 255, 0.02), rgba(255, 255, 255, 0.01));
      --shadow: 0 6px 30px rgba(2, 6, 23, 0.6);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: Inter, system-ui, -apple-system, "Segoe UI", Roboto, Arial, sans-serif;
      display: grid;
      place-items: center;
      padding: 48px 24px;
    }

    [hidden] {
      display: none !important;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      box-shadow: var(--shadow);
      border-radius: 20px;
      padding: 32px;
    }

    header {
      display: flex;
      align-items: center;
      justify-content: space-between;
      font-size: 0.85rem;
      opacity: 0.8;
    }

    .badge {
      text-transform: uppercase;
      letter-spacing: 0.1em;
      font-size: 0.7rem;
      font-weight: 600;
    }

    button,
    .link-button {
      appearance: none;
      border: none;
      background: transparent;
      color: inherit;
      font: inherit;
      cursor: pointer;
      border-radius: 8px;
      padding: 6px 12px;
    }

    button:hover {
      background: rgba(255, 255, 255, 0.06);
    }

    main {
      margin-top: 32px;
      text-align: center;
      display: grid;
      gap: 24px;
    }

    .days {
      font-family: "Space Grotesk", Inter, system-ui;
      font-size: clamp(4rem, 12vw, 6rem);
      font-weight: 800;
      letter-spacing: -0.02em;
    }

    .days small {
      font-size: 1.5rem;
      font-weight: 500;
      opacity: 0.8;
      vertical-align: top;
    }

    .clock {
      font-family: "Space Grotesk", Inter;
      font-size: clamp(2rem, 6vw, 3rem);
      font-weight: 600;
      letter-spacing: 0.05em;
    }

    .focus {
      display: inline-flex;
      align-items: center;
      gap: 10px;
      margin: 0 auto;
      padding: 8px 16px;
      border: 1px solid var(--line);
      border-radius: 999px;
      font-size: 0.9rem;
    }

    .focus form {
      display: inline;
    }

    .quote {
      max-width: 36rem;
      margin: 0 auto;
      font-family: "DM Serif Display", Georgia, serif;
      font-style: italic;
      color: #d4d4d4;
    }

    .search {
      display: flex;
      align-items: center;
      gap: 12px;
      max-width: 36rem;
      margin: 0 auto;
      padding: 10px 16px;
      background: #262626;
      border: 1px solid var(--line);
      border-radius: 999px;
    }

    .search input {
      flex: 1;
      background: transparent;
      border: none;
      outline: none;
      color: inherit;
      font: inherit;
    }

    .search button,
    .primary {
      background: var(--accent);
      color: white;
    }

    footer {
      margin-top: 40px;
      text-align: center;
      font-size: 0.75rem;
      opacity: 0.7;
    }

    footer nav {
      display: flex;
      justify-content: center;
      align-items: center;
      gap: 12px;
    }

    footer a {
      color: inherit;
    }

    .calendar {
      position: absolute;
      top: 80px;
      right: 40px;
      width: 280px;
      padding: 16px;
      border-radius: 16px;
      border: 1px solid #262626;
      background: #0b0b0c;
      box-shadow: 0 10px 30px rgba(0, 0, 0, 0.4);
      cursor: grab;
      user-select: none;
      z-index: 40;
    }

    .calendar.dragging {
      cursor: grabbing;
    }

    .cal-head {
      display: flex;
      justify-content: space-between;
      align-items: center;
      font-size: 0.85rem;
      font-weight: 600;
    }

    .cal-week,
    .cal-names {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 4px;
      margin-top: 4px;
      text-align: center;
    }

    .cal-names {
      margin-top: 12px;
      font-size: 0.7rem;
      opacity: 0.6;
    }

    .cal-day {
      display: inline-flex;
      align-items: center;
      justify-content: center;
      width: 32px;
      height: 32px;
      border-radius: 999px;
      font-size: 0.75rem;
    }

    .cal-day.today {
      background: var(--today);
      color: white;
      font-weight: 600;
      box-shadow: 0 0 0 2px #4ade80;
    }

    .cal-day.past {
      opacity: 0.4;
      text-decoration: line-through;
      text-decoration-color: rgba(248, 113, 113, 0.7);
      color: #737373;
    }

    .cal-day.beyond {
      color: #9ca3af;
      opacity: 0.7;
    }

    .cal-day.future:hover {
      background: #171717;
    }

    .cal-note {
      margin-top: 12px;
      font-size: 0.7rem;
      font-style: italic;
      text-align: center;
      opacity: 0.7;
    }

    .overlay {
      position: fixed;
      inset: 0;
      z-index: 50;
      display: flex;
      align-items: center;
      justify-content: center;
      background: rgba(0, 0, 0, 0.6);
      padding: 24px;
    }

    .overlay form {
      width: min(440px, 100%);
      background: #fafafa;
      color: #0f172a;
      border-radius: 16px;
      padding: 24px;
      display: grid;
      gap: 8px;
    }

    .overlay h3 {
      margin: 0;
    }

    .overlay label {
      font-size: 0.75rem;
      font-weight: 600;
      margin-top: 8px;
    }

    .overlay input {
      padding: 10px;
      border-radius: 8px;
      border: 1px solid #e5e5e5;
      font: inherit;
    }

    .overlay .actions {
      display: flex;
      justify-content: flex-end;
      gap: 12px;
      margin-top: 12px;
    }

    .overlay .tip {
      font-size: 0.75rem;
      color: #737373;
    }
  </style>
</head>
<body>
  <div class="app">
    <header>
      <div>
        <span class="badge">Lock-in: Level Up Mode</span>
        <span id="today-label">&middot; {{TODAY_LABEL}}</span>
      </div>
      <form method="post" action="/edit/open">
        <button type="submit">&#128197; Edit Goal</button>
      </form>
    </header>

    <main>
      <div>
        <div class="days"><span id="days">{{DAYS}}</span> <small>days</small></div>
        <div class="clock" id="clock">{{CLOCK}}</div>
      </div>

      <div class="focus" title="Editable goal text">
        <strong>Focus:</strong>
        <span id="goal">{{GOAL}}</span>
        <button type="button" id="goal-edit" aria-label="Edit focus text">&#9998;</button>
      </div>

      <p class="quote">&ldquo;<span id="quote">{{QUOTE}}</span>&rdquo;</p>

      <form class="search" method="get" action="/search">
        <label for="q" hidden>Search Google</label>
        <span>&#8981;</span>
        <input id="q" name="q" placeholder="Search Google or type a query and press Enter" />
        <button type="submit">Search</button>
      </form>
    </main>

    <footer>
      <nav>
        <a href="#" id="writing-link">Link to writing</a>
        <span>&bull;</span>
        <form method="post" action="/reset">
          <button type="submit" class="link-button">Reset</button>
        </form>
      </nav>
      <div>&copy; <span id="year">{{YEAR}}</span> Lock-in</div>
    </footer>
  </div>

  <aside class="calendar" id="calendar" data-year="{{CAL_YEAR}}" data-month="{{CAL_MONTH}}" data-today="{{TODAY}}">
    <div class="cal-head">
      <span id="cal-label">{{CAL_LABEL}}</span>
      <span>
        <button type="button" id="cal-prev" aria-label="Previous month">&lsaquo;</button>
        <button type="button" id="cal-next" aria-label="Next month">&rsaquo;</button>
      </span>
    </div>
    <div class="cal-names">
      <span>Su</span><span>Mo</span><span>Tu</span><span>We</span><span>Th</span><span>Fr</span><span>Sa</span>
    </div>
    <div id="cal-rows">{{CAL_ROWS}}</div>
    <div class="cal-note">Past days are faded. Today is highlighted.</div>
  </aside>

  <div class="overlay" id="editor" {{EDITOR_HIDDEN}}>
    <form method="post" action="/edit/save">
      <h3>Edit Goal</h3>
      <p class="tip">Choose a target date &amp; time for your lock-in.</p>

      <label for="target">Target date &amp; time</label>
      <input id="target" name="target" type="datetime-local" value="{{TARGET_INPUT}}" />

      <label for="start">Start date &amp; time</label>
      <input id="start" name="start" type="datetime-local" value="{{START_INPUT}}" />

      <label for="goal-input">Goal (optional)</label>
      <input id="goal-input" name="goal" type="text" value="{{GOAL_INPUT}}" />

      <div class="actions">
        <button type="submit" formaction="/edit/cancel" formnovalidate>Cancel</button>
        <button type="submit" class="primary">Save</button>
      </div>

      <p class="tip">Times are local to this machine. Your goal is saved on disk.</p>
    </form>
  </div>

  <script>
    const daysEl = document.getElementById('days');
    const clockEl = document.getElementById('clock');
    const goalEl = document.getElementById('goal');
    const quoteEl = document.getElementById('quote');
    const todayLabelEl = document.getElementById('today-label');
    const yearEl = document.getElementById('year');
    const calendarEl = document.getElementById('calendar');
    const calLabelEl = document.getElementById('cal-label');
    const calRowsEl = document.getElementById('cal-rows');

    let displayMonth = {
      year: Number(calendarEl.dataset.year),
      month: Number(calendarEl.dataset.month)
    };
    // `YYYY-MM` of the viewer's today; the calendar follows it only when it changes.
    let currentMonth = calendarEl.dataset.today.slice(0, 7);

    const render = (snapshot) => {
      daysEl.textContent = snapshot.countdown.days;
      clockEl.textContent = snapshot.countdown.clock;
      goalEl.textContent = snapshot.goal;
      quoteEl.textContent = snapshot.quote;
      todayLabelEl.textContent = '· ' + snapshot.today_label;
      yearEl.textContent = snapshot.year;

      const todayMonth = snapshot.today.slice(0, 7);
      if (todayMonth !== currentMonth) {
        currentMonth = todayMonth;
        const [year, month] = todayMonth.split('-').map(Number);
        displayMonth = { year, month: month - 1 };
        loadCalendar().catch(() => {});
      }
    };

    const renderCalendar = (calendar) => {
      calLabelEl.textContent = calendar.label;
      calRowsEl.replaceChildren(
        ...calendar.weeks.map((week) => {
          const row = document.createElement('div');
          row.className = 'cal-week';
          week.forEach((cell) => {
            const day = document.createElement('span');
            day.className = `cal-day ${cell.status}`;
            day.textContent = cell.day ?? '';
            row.appendChild(day);
          });
          return row;
        })
      );
    };

    const loadCalendar = async () => {
      const res = await fetch(`/api/calendar?year=${displayMonth.year}&month=${displayMonth.month}`);
      if (!res.ok) {
        throw new Error('Unable to load calendar');
      }
      const calendar = await res.json();
      displayMonth = { year: calendar.year, month: calendar.month };
      renderCalendar(calendar);
    };

    const stepMonth = (delta) => {
      displayMonth = { year: displayMonth.year, month: displayMonth.month + delta };
      loadCalendar().catch(() => {});
    };

    document.getElementById('cal-prev').addEventListener('click', () => stepMonth(-1));
    document.getElementById('cal-next').addEventListener('click', () => stepMonth(1));

    document.getElementById('goal-edit').addEventListener('click', async () => {
      const goal = prompt('Edit focus text', goalEl.textContent);
      if (goal === null) {
        return;
      }
      const res = await fetch('/api/goal', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ goal })
      });
      if (res.ok) {
        render(await res.json());
      }
    });

    document.getElementById('writing-link').addEventListener('click', (event) => {
      event.preventDefault();
      const url = prompt('Your blog or writing URL (optional)');
      if (url) {
        window.open(url, '_blank', 'noopener');
      }
    });

    let drag = null;
    calendarEl.addEventListener('mousedown', (event) => {
      if (event.target.closest('button')) {
        return;
      }
      const rect = calendarEl.getBoundingClientRect();
      drag = { x: event.clientX - rect.left, y: event.clientY - rect.top };
      calendarEl.classList.add('dragging');
    });
    document.addEventListener('mousemove', (event) => {
      if (!drag) {
        return;
      }
      calendarEl.style.left = `${event.clientX - drag.x}px`;
      calendarEl.style.top = `${event.clientY - drag.y}px`;
      calendarEl.style.right = 'auto';
    });
    document.addEventListener('mouseup', () => {
      drag = null;
      calendarEl.classList.remove('dragging');
    });

    const ticker = new EventSource('/api/stream');
    ticker.addEventListener('tick', (event) => render(JSON.parse(event.data)));
    window.addEventListener('pagehide', () => ticker.close());
  </script>
</body>
</html>
"##;
