// Trimmed profile pages shared by the extractor tests.

pub const MODERN_PAGE: &str = r#"<html><head><script>window.__state = {};</script></head><body>
<div class="profile-width-content">
  <div class="hdr">
    <div class="TuXA7 ellipsis">Priya Sharma</div>
    <div class="QY5cK"><span title="6y 2m">6y 2m</span><span title="12.5 Lacs">12.5 Lacs</span><span class="location">Pune, Maharashtra</span></div>
    <div class="_0g20Z"><span class="ellipsis" title="Senior Software Engineer at Acme Corp">Senior Software Engineer at Acme Corp</span><span class="ellipsis">B.Tech/B.E.</span></div>
    <div class="rL5xY ellipsis">priya.sharma@example.com</div>
    <div class="contact">+91-9876543210 | linkedin.com/in/priya-sharma</div>
  </div>
  <div class="about-wrap"><blockquote class="about-candidates">Backend engineer with six years in payments.</blockquote></div>
  <div class="Mqi95">Key skills</div>
  <div class="_8QjY0">
    <div class="hPNKf Qu1i6"><div class="read-more">
      <div class="focusable suggestor-tag"><span class="txt ellipsis" title="Java">Java</span></div>
      <div class="focusable suggestor-tag"><span class="txt ellipsis" title="Spring Boot">Spring Bo...</span></div>
      <div class="focusable suggestor-tag"><span class="txt ellipsis" title="Java">Java</span></div>
      <div class="focusable suggestor-tag"><span class="txt ellipsis">+5 more</span></div>
    </div></div>
    <div class="ZVSp3">
      <div class="focusable suggestor-tag"><span class="txt ellipsis" title="Kafka">Kafka</span></div>
      <div class="focusable suggestor-tag"><span class="txt ellipsis">+6 more</span></div>
    </div>
  </div>
  <div class="_4pcQv"><div class="T74Ao">Built payment systems for retail banks.</div></div>
  <div class="s81Wd">
    <div class="OMOoI"><span class="RHIwQ">Industry</span><span class="cMaXa">IT Services</span></div>
    <div class="OMOoI"><span class="RHIwQ">Department</span><span class="cMaXa">Engineering</span></div>
    <div class="OMOoI"><span class="RHIwQ">Role</span><span class="cMaXa">Backend Developer</span></div>
  </div>
  <div class="work-exp">
    <div class="work-exp-card"><div class="exp-label"><div class="desig">Senior Software Engineer at Acme Corp</div><div class="dates"><span>Jan 2020 - Present</span></div></div><div class="desc">Leads the payments team.</div></div>
    <div class="gap-cont"><div class="gap-duration desig">6 months</div><div class="gap-date dates">Jul 2019 - Dec 2019</div></div>
    <div class="work-exp-card"><div class="exp-label"><div class="desig">Software Engineer</div><div class="dates"><span>Jun 2016 - Jun 2019</span></div></div></div>
  </div>
  <div class="other-projects">
    <div class="exp-card">
      <div class="card-head"><div class="exp-text">Payments Gateway</div><div class="exp-label">Mar 2021 - Dec 2021</div></div>
      <div class="exp-text">Tech Lead</div>
      <div class="skills exp-text">Skills: Java, Kafka,</div>
      <div class="role-desc">Role description: Owned the routing layer</div>
      <div class="role-desc proj-desc">Project description: UPI payment routing</div>
    </div>
  </div>
  <div class="cv-educ">
    <div class="edu-wrapper"><div class="edu-label"><div class="desig">B.Tech/B.E., Computers, 2015 <span class="edu-type">Full Time</span></div><div class="dates"><span class="institue">Pune University</span></div></div></div>
    <div class="edu-wrapper"><div class="edu-label"><div class="desig">12th</div><div class="dates"><span class="institue">CBSE</span></div></div></div>
  </div>
  <div class="certification-wrapper"><div class="certification-body"><div class="certification-course">AWS Solutions Architect</div><div class="certification-vendor">Amazon</div></div></div>
  <div id="cv-prev-it-skills" class="cv-prev-it-skills"><div class="tbody">
    <div class="tr"><div class="td col-0"><div class="data-cell">Skills</div></div><div class="td col-1"><div class="data-cell">Version</div></div></div>
    <div class="tr"><div class="td col-0"><div class="data-cell">Java</div></div><div class="td col-1"><div class="data-cell">- -</div></div><div class="td col-2"><div class="data-cell">2024</div></div><div class="td col-3"><div class="data-cell">6 Years</div></div></div>
    <div class="tr"><div class="td col-0"><div class="data-cell">SQL</div></div><div class="td col-1"><div class="data-cell">11</div></div><div class="td col-2"><div class="data-cell">- -</div></div></div>
  </div></div>
  <div class="oHpMk"><div class="ll7Em">English - Proficient (Read, Write, Speak)</div><div class="ll7Em">Hindi</div></div>
  <div class="_3PVFm"><div class="tbody"><div class="tr">
    <div class="td"><div class="table-cell">12 Mar 1993</div></div>
    <div class="td"><div class="table-cell">Female</div></div>
    <div class="td"><div class="table-cell">Single/unmarried</div></div>
    <div class="td"><div class="table-cell">General</div></div>
    <div class="td"><div class="table-cell">No</div></div>
  </div></div></div>
  <div class="TuBlL"><div class="tbody"><div class="tr">
    <div class="td"><div class="table-cell">Permanent</div></div>
    <div class="td"><div class="table-cell">Full Time</div></div>
  </div></div></div>
  <div class="work-auth"><div class="tbody"><div class="tr"><div class="td"><div class="table-cell">India</div></div></div></div></div>
</div>
</body></html>"#;

pub const LEGACY_PAGE: &str = r#"<html><body>
<div class="stl_01"><span class="stl_07">Rahul </span><span class="stl_08">Verma</span></div>
<div class="stl_01"><span class="stl_09">+91-9812345678 | rahul.verma@example.com | linkedin.com/in/rahul-verma</span></div>
<div class="stl_01"><span class="stl_16">Bengaluru, India</span></div>
<div class="stl_01"><span class="stl_14">PROFILE</span></div>
<div class="stl_01"><span class="stl_10">Backend engineer focused on data platforms.</span></div>
<div class="stl_01"><span class="stl_14">EDUCATION</span></div>
<div class="stl_01"><span class="stl_09">Delhi Technological University</span></div>
<div class="stl_01"><span class="stl_15">B.Tech in Computer Science, 2016</span></div>
<div class="stl_01"><span class="stl_14">SKILLS</span></div>
<div class="stl_01"><span class="stl_15">Languages: Java, Python, Go</span></div>
<div class="stl_01"><span class="stl_09">Kubernetes, Terraform</span></div>
<div class="stl_01"><span class="stl_14">EXPERIENCE</span></div>
<div class="stl_01"><span class="stl_09">Acme Corp</span></div>
<div class="stl_01"><span class="stl_15">Senior Engineer</span></div>
<div class="stl_01"><span class="stl_16">Bengaluru</span></div>
<div class="stl_01"><span class="stl_09">Jan 2020 – Dec 2021</span></div>
<div class="stl_01"><span class="stl_17">• Designed the billing pipeline end to end</span></div>
<div class="stl_01"><span class="stl_17">• Cut infrastructure cost by a third</span></div>
<div class="stl_01"><span class="stl_14">ACHIEVEMENTS</span></div>
<div class="stl_01"><span class="stl_17">• Winner of the 2021 internal hackathon</span></div>
<div class="stl_01"><span class="stl_10">AWS Certified Solutions Architect certification, 2022</span></div>
</body></html>"#;

// Slash-numeric dates and a hyphenated employer name.
pub const LEGACY_NUMERIC_DATES_PAGE: &str = r#"<html><body>
<div class="stl_01"><span class="stl_07">Anita </span><span class="stl_08">Rao</span></div>
<div class="stl_01"><span class="stl_14">EXPERIENCE</span></div>
<div class="stl_01"><span class="stl_09">Hewlett-Packard</span></div>
<div class="stl_01"><span class="stl_15">Senior Engineer</span></div>
<div class="stl_01"><span class="stl_09">01/2020 - 12/2021</span></div>
<div class="stl_01"><span class="stl_17">• Designed the billing pipeline end to end</span></div>
<div class="stl_01"><span class="stl_09">Beta Labs</span></div>
<div class="stl_01"><span class="stl_15">Engineer</span></div>
<div class="stl_01"><span class="stl_09">06/2019 – Present</span></div>
<div class="stl_01"><span class="stl_17">• Shipped the first mobile release</span></div>
<div class="stl_01"><span class="stl_14">SKILLS</span></div>
<div class="stl_01"><span class="stl_09">Rust, Go</span></div>
</body></html>"#;
