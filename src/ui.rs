pub fn render_index(month: &str) -> String {
    INDEX_HTML.replace("{{MONTH}}", month)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Attendance Calendar</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #eef2f6;
      --bg-2: #cfdbe8;
      --ink: #23282e;
      --accent: #2f4858;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);

      --green: #3fa66b;
      --red: #d9534f;
      --yellow: #f0c419;
      --orange: #f08a24;
      --blue: #3b7dd8;
      --purple: #8e5bd6;
      --muted: #c9ced6;
      --neutral: #eceff3;

      --dot-white: #ffffff;
      --dot-blue: #1d4ed8;
      --dot-black: #111111;
      --dot-gray: #6b7280;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #f7f9fb 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(900px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.8rem, 4vw, 2.5rem);
      margin: 0;
    }

    .controls {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: end;
    }

    .controls label {
      display: grid;
      gap: 4px;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
      color: #6b645d;
    }

    input, button {
      font: inherit;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.2);
      padding: 10px 14px;
    }

    button {
      background: var(--accent);
      color: white;
      border: none;
      font-weight: 600;
      cursor: pointer;
    }

    .stats {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(130px, 1fr));
      gap: 12px;
    }

    .stat {
      background: white;
      border-radius: 16px;
      padding: 14px;
      border: 1px solid rgba(47, 72, 88, 0.08);
    }

    .stat .label {
      display: block;
      font-size: 0.75rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.6rem;
      font-weight: 600;
      color: var(--accent);
    }

    .grid {
      display: grid;
      grid-template-columns: repeat(7, 1fr);
      gap: 6px;
    }

    .weekday {
      text-align: center;
      font-size: 0.75rem;
      color: #8b857d;
      text-transform: uppercase;
    }

    .cell {
      min-height: 68px;
      border-radius: 12px;
      padding: 6px;
      display: flex;
      flex-direction: column;
      justify-content: space-between;
      background: var(--neutral);
    }

    .cell.blank {
      background: transparent;
    }

    .cell.future {
      opacity: 0.45;
    }

    .cell .day {
      font-weight: 600;
      font-size: 0.9rem;
    }

    .cell .badge {
      align-self: flex-end;
      font-size: 0.75rem;
      font-weight: 600;
    }

    .dots {
      display: flex;
      gap: 3px;
    }

    .dot {
      width: 8px;
      height: 8px;
      border-radius: 50%;
      border: 1px solid rgba(0, 0, 0, 0.15);
    }

    .legend {
      display: flex;
      flex-wrap: wrap;
      gap: 8px 16px;
      font-size: 0.85rem;
    }

    .legend .swatch {
      display: inline-block;
      width: 14px;
      height: 14px;
      border-radius: 4px;
      vertical-align: middle;
      margin-right: 6px;
    }

    .status {
      min-height: 1.2em;
      font-size: 0.9rem;
      color: #6b645d;
    }

    .status.error {
      color: var(--red);
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Attendance Calendar</h1>
    </header>

    <form class="controls" id="query-form">
      <label>Member
        <input id="member" list="members" required placeholder="Card number" />
        <datalist id="members"></datalist>
      </label>
      <label>Month
        <input id="month" type="month" value="{{MONTH}}" required />
      </label>
      <button type="submit">Show</button>
    </form>

    <div class="status" id="status"></div>

    <section class="stats">
      <div class="stat"><span class="label">Present</span><span class="value" id="stat-present">0</span></div>
      <div class="stat"><span class="label">Not completed</span><span class="value" id="stat-not-completed">0</span></div>
      <div class="stat"><span class="label">Half day</span><span class="value" id="stat-half-day">0</span></div>
      <div class="stat"><span class="label">Miss</span><span class="value" id="stat-miss">0</span></div>
      <div class="stat"><span class="label">Total</span><span class="value" id="stat-total">0</span></div>
    </section>

    <section class="grid" id="grid"></section>

    <section class="legend" id="legend"></section>
  </main>

  <script>
    const WEEKDAYS = ['Sun', 'Mon', 'Tue', 'Wed', 'Thu', 'Fri', 'Sat'];

    const form = document.getElementById('query-form');
    const memberEl = document.getElementById('member');
    const monthEl = document.getElementById('month');
    const membersEl = document.getElementById('members');
    const gridEl = document.getElementById('grid');
    const legendEl = document.getElementById('legend');
    const statusEl = document.getElementById('status');

    const setStatus = (message, kind) => {
      statusEl.textContent = message;
      statusEl.className = `status ${kind || ''}`;
    };

    const renderDots = (dots) => {
      const wrap = document.createElement('div');
      wrap.className = 'dots';
      dots.forEach((dot) => {
        for (let i = 0; i < dot.count; i += 1) {
          const el = document.createElement('span');
          el.className = 'dot';
          el.style.background = `var(--dot-${dot.color})`;
          wrap.appendChild(el);
        }
      });
      return wrap;
    };

    const renderGrid = (view) => {
      gridEl.innerHTML = '';
      WEEKDAYS.forEach((name) => {
        const el = document.createElement('div');
        el.className = 'weekday';
        el.textContent = name;
        gridEl.appendChild(el);
      });

      view.cells.forEach((cell) => {
        const el = document.createElement('div');
        if (cell.day === null) {
          el.className = 'cell blank';
          gridEl.appendChild(el);
          return;
        }

        el.className = cell.is_future ? 'cell future' : 'cell';
        const day = document.createElement('span');
        day.className = 'day';
        day.textContent = cell.day;
        el.appendChild(day);

        if (cell.style) {
          el.style.background = `var(--${cell.style.background})`;
          el.appendChild(renderDots(cell.style.dots));
          const badge = document.createElement('span');
          badge.className = 'badge';
          badge.textContent = cell.label;
          el.appendChild(badge);
          const record = cell.record || {};
          el.title = [record.status, record.timeIn, record.timeOut, record.remarks]
            .filter(Boolean)
            .join(' | ');
        }
        gridEl.appendChild(el);
      });
    };

    const renderSummary = (summary) => {
      document.getElementById('stat-present').textContent = summary.present;
      document.getElementById('stat-not-completed').textContent = summary.not_completed;
      document.getElementById('stat-half-day').textContent = summary.half_day;
      document.getElementById('stat-miss').textContent = summary.miss;
      document.getElementById('stat-total').textContent = summary.total;
    };

    const loadLegend = async () => {
      const res = await fetch('/api/legend');
      if (!res.ok) {
        throw new Error('Unable to load legend');
      }
      const entries = await res.json();
      legendEl.replaceChildren(...entries.map((entry) => {
        const item = document.createElement('span');
        const swatch = document.createElement('span');
        swatch.className = 'swatch';
        swatch.style.background = `var(--${entry.style.background})`;
        item.appendChild(swatch);
        item.appendChild(document.createTextNode(entry.statuses[0]));
        return item;
      }));
    };

    const loadMembers = async () => {
      const res = await fetch('/api/members');
      if (!res.ok) {
        throw new Error('Unable to load members');
      }
      const members = await res.json();
      membersEl.replaceChildren(...members.map((entry) => {
        const option = document.createElement('option');
        option.value = entry.member;
        option.textContent = `${entry.records} records`;
        return option;
      }));
      if (!memberEl.value && members.length) {
        memberEl.value = members[0].member;
      }
    };

    const loadCalendar = async () => {
      const member = memberEl.value.trim();
      if (!member) {
        return;
      }
      setStatus('Loading...', '');
      const month = `${monthEl.value}-01`;
      const res = await fetch(`/api/members/${encodeURIComponent(member)}/calendar?month=${month}`);
      if (!res.ok) {
        gridEl.innerHTML = '';
        renderSummary({ present: 0, not_completed: 0, half_day: 0, miss: 0, total: 0 });
        throw new Error((await res.text()) || 'No attendance found');
      }
      const view = await res.json();
      renderGrid(view);
      renderSummary(view.summary);
      setStatus('', '');
    };

    form.addEventListener('submit', (event) => {
      event.preventDefault();
      loadCalendar().catch((err) => setStatus(err.message, 'error'));
    });

    Promise.all([loadLegend(), loadMembers()])
      .then(loadCalendar)
      .catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
